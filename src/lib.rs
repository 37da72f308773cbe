//! Bank Ledger Library
//!
//! # Overview
//!
//! An in-process, single-node ledger simulator: accounts with their own locks,
//! deposits, withdrawals and transfers that can run on many threads at once,
//! and an append-only log of completed transactions.
//!
//! # Architecture
//!
//! - [`types`] - Plain data (ids, snapshots, transactions, operations, errors)
//! - [`core`] - Concurrency-safe ledger:
//!   - [`core::account`] - Lock-guarded balance with ordered two-account transfers
//!   - [`core::ledger`] - Account collection, lookup and recording
//!   - [`core::transaction_log`] - Append-only log with sequential ids
//!   - [`core::engine`] - Routes operations and records them on success
//!   - [`core::batch_processor`] - Parallel batches partitioned by account
//! - [`io`] - Operation script parsing and CSV output
//! - [`strategy`] - Sync and concurrent script pipelines
//! - [`cli`] - Command-line arguments and logging setup
//!
//! # Invariants
//!
//! - A balance is never negative, however operations interleave.
//! - A transfer either moves the full amount or changes nothing.
//! - Account ids count up from 1000 and transaction ids from 1, per ledger.
//!
//! ```
//! use bank_ledger::{Ledger, TransactionType};
//!
//! let ledger = Ledger::new();
//! let alice = ledger.create_account("Alice", "Savings", 100).unwrap();
//! let bob = ledger.create_account("Bob", "Current", 50).unwrap();
//!
//! ledger.transfer(alice, bob, 100).unwrap();
//! ledger.record_transaction(TransactionType::Transfer, 100, alice, Some(bob));
//!
//! assert!(ledger.transfer(alice, bob, 1).is_err());
//! assert_eq!(ledger.account(bob).unwrap().balance(), 150);
//! assert_eq!(ledger.list_transactions().len(), 1);
//! ```

pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{Account, Ledger, LedgerEngine, TransactionLog};
pub use io::{write_accounts_csv, write_transactions_csv};
pub use types::{
    AccountId, AccountSnapshot, Amount, LedgerError, Operation, Outcome, Transaction,
    TransactionId, TransactionType,
};
