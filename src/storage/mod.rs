//! Storage layer for the household ledger
//!
//! One headerless CSV file per user, read and written through the record
//! codec, with atomic writes and automatic directory creation.

pub mod codec;
pub mod file_io;
pub mod members;
pub mod query;
pub mod transactions;

pub use codec::RecordCodec;
pub use file_io::{read_records, write_records_atomic, FileStamp};
pub use members::MemberRegistry;
pub use query::{RangeQuery, TransactionQuery};
pub use transactions::TransactionStore;
