//! Types module
//!
//! Plain data shared across the crate:
//! - `account`: account identifiers and snapshots
//! - `transaction`: transaction records and identifiers
//! - `operation`: operation requests and their outcomes
//! - `error`: error types for the ledger

pub mod account;
pub mod error;
pub mod operation;
pub mod transaction;

pub use account::{AccountId, AccountSnapshot, Amount, FIRST_ACCOUNT_ID};
pub use error::LedgerError;
pub use operation::{Operation, Outcome};
pub use transaction::{Transaction, TransactionId, TransactionType};
