//! Core ledger module
//!
//! This module contains the concurrency-safe ledger components:
//! - `account` - Lock-guarded balance cell with ordered two-account transfers
//! - `transaction_log` - Append-only log with its own id counter
//! - `ledger` - Account collection, lookup and recording
//! - `engine` - Operation routing that records transactions on success
//! - `batch_processor` - Parallel batches partitioned by source account

pub mod account;
pub mod batch_processor;
pub mod engine;
pub mod ledger;
pub mod transaction_log;

pub use account::Account;
pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use engine::LedgerEngine;
pub use ledger::Ledger;
pub use transaction_log::TransactionLog;
