//! Operation processing engine
//!
//! This module provides the LedgerEngine that drives operations against a
//! [`Ledger`]: it routes each operation to the ledger and, only when the
//! operation succeeds, records the matching transaction.
//!
//! The engine holds the ledger behind an `Arc` and takes `&self`, so one engine
//! can be shared by many worker threads.

use crate::core::ledger::Ledger;
use crate::types::{AccountId, Amount, LedgerError, Operation, Outcome, TransactionType};
use std::sync::Arc;

/// Operation processing engine
#[derive(Debug, Clone)]
pub struct LedgerEngine {
    ledger: Arc<Ledger>,
}

impl LedgerEngine {
    /// Create an engine over a fresh ledger
    pub fn new() -> Self {
        Self::with_ledger(Arc::new(Ledger::new()))
    }

    /// Create an engine over an existing ledger
    pub fn with_ledger(ledger: Arc<Ledger>) -> Self {
        LedgerEngine { ledger }
    }

    /// The ledger this engine drives
    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }

    /// Process a single operation
    ///
    /// # Returns
    ///
    /// * `Ok(Outcome::Opened(id))` for a successful open
    /// * `Ok(Outcome::Recorded(tx))` for a successful deposit, withdrawal or
    ///   transfer, with the id of the recorded transaction
    /// * `Err(LedgerError)` if the ledger rejected the operation; nothing was
    ///   changed and nothing was recorded
    pub fn process(&self, operation: Operation) -> Result<Outcome, LedgerError> {
        match operation {
            Operation::Open {
                name,
                kind,
                initial_balance,
            } => self
                .ledger
                .create_account(&name, &kind, initial_balance)
                .map(Outcome::Opened),
            Operation::Deposit { account, amount } => {
                self.ledger.deposit(account, amount)?;
                Ok(self.record(TransactionType::Deposit, amount, account, None))
            }
            Operation::Withdraw { account, amount } => {
                self.ledger.withdraw(account, amount)?;
                Ok(self.record(TransactionType::Withdraw, amount, account, None))
            }
            Operation::Transfer { from, to, amount } => {
                self.ledger.transfer(from, to, amount)?;
                Ok(self.record(TransactionType::Transfer, amount, from, Some(to)))
            }
        }
    }

    fn record(
        &self,
        tx_type: TransactionType,
        amount: Amount,
        from: AccountId,
        to: Option<AccountId>,
    ) -> Outcome {
        Outcome::Recorded(self.ledger.record_transaction(tx_type, amount, from, to))
    }
}

impl Default for LedgerEngine {
    fn default() -> Self {
        Self::new()
    }
}
