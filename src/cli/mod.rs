//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the transaction store.

pub mod member;
pub mod report;
pub mod transaction;

pub use member::{handle_member_command, MemberCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, KindArg, SortArg, TransactionCommands};
