//! Display formatting for terminal output
//!
//! Provides utilities for formatting transactions, members and categories
//! for terminal display. Reports format themselves.

pub mod member;
pub mod transaction;

pub use member::{format_category_list, format_member_list};
pub use transaction::{
    format_date, format_transaction_details, format_transaction_register, format_transaction_row,
};
