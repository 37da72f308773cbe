//! Error types for the bank ledger
//!
//! Every failure the ledger or its drivers can report is a [`LedgerError`]
//! variant. Nothing in the core panics or prints; failures are returned to the
//! caller, which decides how to surface them.
//!
//! # Error Categories
//!
//! - **Ledger Errors**: invalid amount, insufficient funds, unknown account,
//!   self-transfer, arithmetic overflow
//! - **Script Errors**: unknown operation, missing or malformed fields
//! - **Driver Errors**: file not found, I/O, runtime setup

use super::account::{AccountId, Amount};
use thiserror::Error;

/// Main error type for the bank ledger
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// File not found at the specified path
    ///
    /// Fatal for a driver run.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error while reading scripts or writing output
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error
    ///
    /// The offending row is skipped and processing continues.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Unknown operation name in a script row
    #[error("Invalid operation '{op}'")]
    InvalidOperation {
        /// The operation name as written
        op: String,
    },

    /// A script row lacks a field its operation needs
    #[error("{op} operation requires '{field}'")]
    MissingField {
        /// Operation being parsed
        op: String,
        /// Name of the missing column
        field: String,
    },

    /// Amount is zero or negative (or an opening balance is negative)
    ///
    /// The operation is rejected and no balance changes.
    #[error("Invalid amount {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Amount,
    },

    /// Withdrawal or transfer exceeds the source balance
    ///
    /// The operation is rejected and no balance changes.
    #[error("Insufficient funds in account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Source account
        account: AccountId,
        /// Balance at the time of the check
        balance: Amount,
        /// Requested amount
        requested: Amount,
    },

    /// No account with this id exists on the ledger
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The id that was looked up
        account: AccountId,
    },

    /// Transfer names the same account as source and destination
    #[error("Cannot transfer from account {account} to itself")]
    SelfTransfer {
        /// The account named twice
        account: AccountId,
    },

    /// A credit would overflow the balance
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account being credited
        account: AccountId,
    },

    /// The worker runtime could not be started
    #[error("Runtime error: {message}")]
    RuntimeError {
        /// Description of the failure
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        // Keep only the inner cause; the line is carried separately.
        let message = match error.kind() {
            csv::ErrorKind::Io(e) => {
                return LedgerError::IoError {
                    message: e.to_string(),
                }
            }
            csv::ErrorKind::Utf8 { err, .. } => err.to_string(),
            csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => format!("expected {} fields, found {}", expected_len, len),
            _ => error.to_string(),
        };

        LedgerError::ParseError { line, message }
    }
}

impl LedgerError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Amount) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: AccountId, balance: Amount, requested: Amount) -> Self {
        LedgerError::InsufficientFunds {
            account,
            balance,
            requested,
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: AccountId) -> Self {
        LedgerError::AccountNotFound { account }
    }

    /// Create a SelfTransfer error
    pub fn self_transfer(account: AccountId) -> Self {
        LedgerError::SelfTransfer { account }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: AccountId) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account,
        }
    }

    /// Create an InvalidOperation error
    pub fn invalid_operation(op: &str) -> Self {
        LedgerError::InvalidOperation { op: op.to_string() }
    }

    /// Create a MissingField error
    pub fn missing_field(op: &str, field: &str) -> Self {
        LedgerError::MissingField {
            op: op.to_string(),
            field: field.to_string(),
        }
    }

    /// Create a ParseError error
    pub fn parse_error(line: Option<u64>, message: impl Into<String>) -> Self {
        LedgerError::ParseError {
            line,
            message: message.into(),
        }
    }
}
