//! Member and category CLI commands

use clap::Subcommand;

use crate::display::member::{format_category_list, format_member_list};
use crate::error::LedgerResult;
use crate::storage::TransactionStore;

/// Member and category subcommands
#[derive(Subcommand, Debug)]
pub enum MemberCommands {
    /// List household members
    Members,

    /// Rename a member across all of their transactions
    #[command(name = "rename-member")]
    RenameMember {
        /// Current name (exact match first, then case-insensitive)
        old: String,
        /// New name
        new: String,
    },

    /// List income and expense categories
    Categories,
}

/// Handle a member or category command
pub fn handle_member_command(store: &mut TransactionStore, cmd: MemberCommands) -> LedgerResult<()> {
    match cmd {
        MemberCommands::Members => {
            print!(
                "{}",
                format_member_list(store.members().members(), store.transactions())
            );
        }

        MemberCommands::RenameMember { old, new } => {
            let changed = store.rename_member(&old, &new)?;
            store.save()?;
            println!("Renamed '{}' to '{}' ({} transaction(s) updated)", old, new, changed);
        }

        MemberCommands::Categories => {
            print!("{}", format_category_list());
        }
    }

    Ok(())
}
