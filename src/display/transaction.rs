//! Transaction display formatting
//!
//! Register views and detail blocks for terminal output.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::Transaction;

/// Format a date with a strftime pattern, falling back to `YYYY-MM-DD`
/// when the pattern cannot be rendered.
pub fn format_date(date: NaiveDate, date_format: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", date.format(date_format)) {
        Ok(()) => out,
        Err(_) => date.format("%Y-%m-%d").to_string(),
    }
}

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, currency: &str, date_format: &str) -> String {
    let date = txn
        .date()
        .map(|d| format_date(d, date_format))
        .unwrap_or_else(|| "(no date)".to_string());

    let signed = if txn.is_income() {
        format!("{}{:.2}", currency, txn.amount())
    } else {
        format!("-{}{:.2}", currency, txn.amount())
    };

    format!(
        "{:>5} {:10} {:8} {:20} {:>14} {}",
        txn.id(),
        date,
        txn.kind().label(),
        truncate(txn.category().name(), 20),
        signed,
        txn.member()
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(
    transactions: &[Transaction],
    currency: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5} {:10} {:8} {:20} {:>14} {}\n",
        "ID", "Date", "Type", "Category", "Amount", "Member"
    ));
    output.push_str(&"-".repeat(72));
    output.push('\n');

    let mut net = 0.0;
    for txn in transactions {
        output.push_str(&format_transaction_row(txn, currency, date_format));
        output.push('\n');
        if txn.is_income() {
            net += txn.amount();
        } else {
            net -= txn.amount();
        }
    }

    output.push_str(&"-".repeat(72));
    output.push('\n');
    output.push_str(&format!(
        "{} transaction(s), net {}{:.2}\n",
        transactions.len(),
        currency,
        net
    ));

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, currency: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id()));
    match txn.date() {
        Some(date) => output.push_str(&format!("Date:        {}\n", format_date(date, date_format))),
        None => output.push_str("Date:        (none)\n"),
    }
    output.push_str(&format!("Type:        {}\n", txn.kind()));
    output.push_str(&format!("Category:    {}\n", txn.category()));
    output.push_str(&format!("Amount:      {}{:.2}\n", currency, txn.amount()));
    output.push_str(&format!("Member:      {}\n", txn.member()));

    output
}

/// Truncate a string to a maximum length
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
