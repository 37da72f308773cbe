//! Operation requests driven against a ledger
//!
//! Operations are what a caller asks the ledger to do; transactions are what the
//! ledger records once an operation has succeeded.

use super::account::{AccountId, Amount};

/// A single request against the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Open a new account with an opening balance
    Open {
        name: String,
        kind: String,
        initial_balance: Amount,
    },

    /// Credit `amount` to `account`
    Deposit { account: AccountId, amount: Amount },

    /// Debit `amount` from `account`
    Withdraw { account: AccountId, amount: Amount },

    /// Move `amount` from `from` to `to`
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Amount,
    },
}

impl Operation {
    /// Account the operation is initiated against
    ///
    /// `None` for [`Operation::Open`], which has no account until it succeeds.
    pub fn source_account(&self) -> Option<AccountId> {
        match self {
            Operation::Open { .. } => None,
            Operation::Deposit { account, .. } | Operation::Withdraw { account, .. } => {
                Some(*account)
            }
            Operation::Transfer { from, .. } => Some(*from),
        }
    }

    /// Whether this operation opens an account
    pub fn is_open(&self) -> bool {
        matches!(self, Operation::Open { .. })
    }
}

/// Result of a successfully processed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// An account was opened with this id
    Opened(AccountId),

    /// Balances moved and the log recorded this transaction id
    Recorded(super::transaction::TransactionId),
}
