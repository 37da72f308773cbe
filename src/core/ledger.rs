//! Ledger: the aggregate owning all accounts and the transaction log
//!
//! The ledger is responsible for:
//! - Assigning account ids (from 1000) and opening accounts
//! - Looking accounts up by id
//! - Routing deposits, withdrawals and transfers to the accounts involved
//! - Recording completed operations in the transaction log
//!
//! # Locking
//!
//! - The account collection and its id counter sit behind one `RwLock`. Opening
//!   an account takes the write lock; lookups share the read lock.
//! - Each account guards its own balance (see [`crate::core::account`]).
//! - The transaction log guards its entries and id counter with its own mutex.
//!
//! No lock is held across another component's lock except the two account
//! locks of a transfer, which are ordered by account id.
//!
//! A single ledger-wide lock around every balance change would also be correct
//! and simpler; per-account locks let operations on unrelated accounts proceed
//! in parallel.

use crate::core::account::Account;
use crate::core::transaction_log::TransactionLog;
use crate::types::{
    AccountId, AccountSnapshot, Amount, LedgerError, Transaction, TransactionId, TransactionType,
    FIRST_ACCOUNT_ID,
};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

#[derive(Debug)]
struct AccountsState {
    next_id: AccountId,
    accounts: Vec<Arc<Account>>,
}

/// In-memory ledger
///
/// Each instance owns its own locks and counters, so independent ledgers can
/// coexist in one process.
#[derive(Debug)]
pub struct Ledger {
    accounts: RwLock<AccountsState>,
    transactions: TransactionLog,
}

impl Ledger {
    /// Create a ledger with no accounts and an empty log
    pub fn new() -> Self {
        Ledger {
            accounts: RwLock::new(AccountsState {
                next_id: FIRST_ACCOUNT_ID,
                accounts: Vec::new(),
            }),
            transactions: TransactionLog::new(),
        }
    }

    /// Open an account and return its id
    ///
    /// Ids are sequential per ledger, starting at 1000. A zero opening balance
    /// is allowed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if `initial_balance` is negative; no id is
    /// consumed in that case.
    pub fn create_account(
        &self,
        name: &str,
        kind: &str,
        initial_balance: Amount,
    ) -> Result<AccountId, LedgerError> {
        if initial_balance < 0 {
            return Err(LedgerError::invalid_amount(initial_balance));
        }

        let mut state = self.write_accounts();
        let id = state.next_id;
        state.next_id += 1;
        state.accounts.push(Arc::new(Account::new(
            id,
            name.to_string(),
            kind.to_string(),
            initial_balance,
        )));

        debug!(account = id, name, kind, initial_balance, "account opened");
        Ok(id)
    }

    /// Find an account by id
    ///
    /// Linear scan in creation order.
    pub fn find_account(&self, id: AccountId) -> Option<Arc<Account>> {
        self.read_accounts()
            .accounts
            .iter()
            .find(|account| account.id() == id)
            .cloned()
    }

    /// Find an account by id, failing with `AccountNotFound`
    pub fn account(&self, id: AccountId) -> Result<Arc<Account>, LedgerError> {
        self.find_account(id)
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    /// Credit `amount` to account `id`
    ///
    /// Does not record a transaction; see [`Ledger::record_transaction`].
    pub fn deposit(&self, id: AccountId, amount: Amount) -> Result<(), LedgerError> {
        self.account(id)?.deposit(amount)
    }

    /// Debit `amount` from account `id`
    ///
    /// Does not record a transaction; see [`Ledger::record_transaction`].
    pub fn withdraw(&self, id: AccountId, amount: Amount) -> Result<(), LedgerError> {
        self.account(id)?.withdraw(amount)
    }

    /// Move `amount` from account `from` to account `to`
    ///
    /// Both accounts must exist; the source is checked first. Does not record a
    /// transaction; see [`Ledger::record_transaction`].
    pub fn transfer(&self, from: AccountId, to: AccountId, amount: Amount) -> Result<(), LedgerError> {
        let source = self.account(from)?;
        let destination = self.account(to)?;
        source.transfer(&destination, amount)
    }

    /// Append a record for a completed operation and return its id
    pub fn record_transaction(
        &self,
        tx_type: TransactionType,
        amount: Amount,
        from: AccountId,
        to: Option<AccountId>,
    ) -> TransactionId {
        self.transactions.record(tx_type, amount, from, to)
    }

    /// Snapshots of all accounts in creation order
    pub fn list_accounts(&self) -> Vec<AccountSnapshot> {
        // Clone the handles first so balance locks are not taken under the
        // collection lock.
        let accounts: Vec<Arc<Account>> = self.read_accounts().accounts.clone();
        accounts.iter().map(|account| account.snapshot()).collect()
    }

    /// All transaction records in recording order
    pub fn list_transactions(&self) -> Vec<Transaction> {
        self.transactions.entries()
    }

    pub fn account_count(&self) -> usize {
        self.read_accounts().accounts.len()
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.count()
    }

    /// Sum of all balances
    pub fn total_balance(&self) -> Amount {
        self.list_accounts()
            .iter()
            .map(|snapshot| snapshot.balance)
            .sum()
    }

    fn read_accounts(&self) -> RwLockReadGuard<'_, AccountsState> {
        self.accounts.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_accounts(&self) -> RwLockWriteGuard<'_, AccountsState> {
        self.accounts.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
