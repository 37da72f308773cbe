//! Append-only transaction log
//!
//! The log assigns transaction ids and appends records under one mutex, so ids
//! are strictly increasing and match the order records land in the log.
//!
//! # Ordering
//!
//! Ids follow the order in which [`TransactionLog::record`] calls complete, not
//! the order the balance changes began. Recording is driven by the caller after
//! an operation succeeds.

use crate::types::{AccountId, Amount, Transaction, TransactionId, TransactionType};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug)]
struct LogState {
    next_id: TransactionId,
    entries: Vec<Transaction>,
}

/// Thread-safe transaction log
#[derive(Debug)]
pub struct TransactionLog {
    state: Mutex<LogState>,
}

impl TransactionLog {
    /// Create an empty log whose first record gets id 1
    pub fn new() -> Self {
        TransactionLog {
            state: Mutex::new(LogState {
                next_id: 1,
                entries: Vec::new(),
            }),
        }
    }

    /// Append a record for a completed operation
    ///
    /// # Arguments
    ///
    /// * `tx_type` - Which operation completed
    /// * `amount` - Amount moved
    /// * `from` - Account the operation was initiated against
    /// * `to` - Receiving account for transfers, `None` otherwise
    ///
    /// # Returns
    ///
    /// The id assigned to the new record
    pub fn record(
        &self,
        tx_type: TransactionType,
        amount: Amount,
        from: AccountId,
        to: Option<AccountId>,
    ) -> TransactionId {
        let mut state = self.lock_state();
        let id = state.next_id;
        state.next_id += 1;
        state.entries.push(Transaction::new(id, tx_type, amount, from, to));

        debug!(tx = id, tx_type = %tx_type, amount, from, ?to, "transaction recorded");
        id
    }

    /// Copies of all records in recording order
    pub fn entries(&self) -> Vec<Transaction> {
        self.lock_state().entries.clone()
    }

    /// Number of records in the log
    pub fn count(&self) -> usize {
        self.lock_state().entries.len()
    }

    // Appends are a single push after the id bump; a poisoned guard still holds
    // a consistent log.
    fn lock_state(&self) -> MutexGuard<'_, LogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TransactionLog {
    fn default() -> Self {
        Self::new()
    }
}
