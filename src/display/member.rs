//! Member and category listings

use crate::models::{Category, Member, Transaction, TransactionKind};

/// Format the member list with a transaction count per member
pub fn format_member_list(members: &[Member], transactions: &[Transaction]) -> String {
    if members.is_empty() {
        return "No members found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:30} {:>12}\n", "Member", "Transactions"));
    output.push_str(&"-".repeat(43));
    output.push('\n');

    for member in members {
        let count = transactions.iter().filter(|t| t.member() == member).count();
        output.push_str(&format!("{:30} {:>12}\n", member.name(), count));
    }

    output
}

/// Format both category families, one name per line
pub fn format_category_list() -> String {
    let mut output = String::new();

    for kind in [TransactionKind::Income, TransactionKind::Expense] {
        output.push_str(&format!("{}:\n", kind.label()));
        for category in Category::all_of(kind) {
            output.push_str(&format!("  {}\n", category.name()));
        }
    }

    output
}
