//! Lock-guarded account
//!
//! An [`Account`] is a balance cell behind its own mutex. All balance changes
//! go through [`Account::deposit`], [`Account::withdraw`] and
//! [`Account::transfer`], which check their preconditions under the lock, so the
//! balance is never observed negative.
//!
//! # Lock Ordering
//!
//! A transfer holds two account locks at once. They are always taken in
//! ascending account id, whatever the direction of the transfer, so two
//! transfers moving funds in opposite directions between the same pair cannot
//! deadlock.

use crate::types::{AccountId, AccountSnapshot, Amount, LedgerError};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A named balance holder
///
/// Accounts are owned by the ledger and shared with callers through `Arc`; they
/// are never cloned, so each balance has exactly one lock.
#[derive(Debug)]
pub struct Account {
    id: AccountId,
    name: String,
    kind: String,
    balance: Mutex<Amount>,
}

impl Account {
    /// Create an account with an opening balance
    ///
    /// The ledger validates `initial_balance` before calling this.
    pub(crate) fn new(id: AccountId, name: String, kind: String, initial_balance: Amount) -> Self {
        Account {
            id,
            name,
            kind,
            balance: Mutex::new(initial_balance),
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Account type, e.g. "Savings"
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Current balance
    pub fn balance(&self) -> Amount {
        *self.lock_balance()
    }

    /// Consistent copy of the account taken under its lock
    pub fn snapshot(&self) -> AccountSnapshot {
        let balance = self.lock_balance();
        AccountSnapshot {
            id: self.id,
            name: self.name.clone(),
            kind: self.kind.clone(),
            balance: *balance,
        }
    }

    /// Credit `amount` to this account
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`
    /// - `ArithmeticOverflow` if the balance would overflow
    pub fn deposit(&self, amount: Amount) -> Result<(), LedgerError> {
        validate_amount(amount)?;

        let mut balance = self.lock_balance();
        *balance = balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", self.id))?;

        Ok(())
    }

    /// Debit `amount` from this account
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`
    /// - `InsufficientFunds` if `amount` exceeds the balance
    pub fn withdraw(&self, amount: Amount) -> Result<(), LedgerError> {
        validate_amount(amount)?;

        let mut balance = self.lock_balance();
        if amount > *balance {
            return Err(LedgerError::insufficient_funds(self.id, *balance, amount));
        }
        *balance -= amount;

        Ok(())
    }

    /// Move `amount` from this account to `to`
    ///
    /// Both locks are held before either balance changes, so the transfer is
    /// all-or-nothing.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`
    /// - `SelfTransfer` if `to` is this account
    /// - `InsufficientFunds` if `amount` exceeds this account's balance
    /// - `ArithmeticOverflow` if the destination balance would overflow
    pub fn transfer(&self, to: &Account, amount: Amount) -> Result<(), LedgerError> {
        validate_amount(amount)?;
        if self.id == to.id {
            return Err(LedgerError::self_transfer(self.id));
        }

        let source_first = self.id < to.id;
        let (first, second) = if source_first { (self, to) } else { (to, self) };
        let mut first_guard = first.lock_balance();
        let mut second_guard = second.lock_balance();
        let (source, destination) = if source_first {
            (&mut *first_guard, &mut *second_guard)
        } else {
            (&mut *second_guard, &mut *first_guard)
        };

        if amount > *source {
            return Err(LedgerError::insufficient_funds(self.id, *source, amount));
        }
        let credited = destination
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("transfer", to.id))?;

        *source -= amount;
        *destination = credited;

        Ok(())
    }

    // A panic while holding the lock cannot leave a half-written balance: every
    // mutation is a single store after all checks pass.
    fn lock_balance(&self) -> MutexGuard<'_, Amount> {
        self.balance.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Reject zero and negative amounts
pub(crate) fn validate_amount(amount: Amount) -> Result<(), LedgerError> {
    if amount <= 0 {
        return Err(LedgerError::invalid_amount(amount));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Arc;
    use std::thread;

    fn account(id: AccountId, balance: Amount) -> Account {
        Account::new(id, "Test".to_string(), "Savings".to_string(), balance)
    }

    #[test]
    fn test_new_account_snapshot() {
        let acc = Account::new(1000, "Alice".to_string(), "Savings".to_string(), 100);

        let snapshot = acc.snapshot();

        assert_eq!(snapshot.id, 1000);
        assert_eq!(snapshot.name, "Alice");
        assert_eq!(snapshot.kind, "Savings");
        assert_eq!(snapshot.balance, 100);
    }

    #[test]
    fn test_deposit_increases_balance() {
        let acc = account(1000, 100);

        assert!(acc.deposit(50).is_ok());
        assert_eq!(acc.balance(), 150);
    }

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-5)]
    fn test_deposit_rejects_non_positive_amount(#[case] amount: Amount) {
        let acc = account(1000, 100);

        let result = acc.deposit(amount);

        assert_eq!(result, Err(LedgerError::invalid_amount(amount)));
        assert_eq!(acc.balance(), 100);
    }

    #[test]
    fn test_deposit_overflow_leaves_balance_unchanged() {
        let acc = account(1000, Amount::MAX);

        let result = acc.deposit(1);

        assert!(matches!(
            result,
            Err(LedgerError::ArithmeticOverflow { account: 1000, .. })
        ));
        assert_eq!(acc.balance(), Amount::MAX);
    }

    #[rstest]
    #[case::partial(100, 40, 60)]
    #[case::entire_balance(100, 100, 0)]
    fn test_withdraw_with_sufficient_funds(
        #[case] initial: Amount,
        #[case] amount: Amount,
        #[case] expected: Amount,
    ) {
        let acc = account(1000, initial);

        assert!(acc.withdraw(amount).is_ok());
        assert_eq!(acc.balance(), expected);
    }

    #[test]
    fn test_withdraw_with_insufficient_funds() {
        let acc = account(1001, 50);

        let result = acc.withdraw(100);

        assert_eq!(result, Err(LedgerError::insufficient_funds(1001, 50, 100)));
        assert_eq!(acc.balance(), 50);
    }

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-1)]
    fn test_withdraw_rejects_non_positive_amount(#[case] amount: Amount) {
        let acc = account(1000, 100);

        assert_eq!(acc.withdraw(amount), Err(LedgerError::invalid_amount(amount)));
        assert_eq!(acc.balance(), 100);
    }

    #[rstest]
    #[case::ascending_ids(1000, 1001)]
    #[case::descending_ids(1001, 1000)]
    fn test_transfer_moves_funds(#[case] from_id: AccountId, #[case] to_id: AccountId) {
        let from = account(from_id, 150);
        let to = account(to_id, 50);

        assert!(from.transfer(&to, 150).is_ok());
        assert_eq!(from.balance(), 0);
        assert_eq!(to.balance(), 200);
    }

    #[test]
    fn test_transfer_with_insufficient_funds_changes_nothing() {
        let from = account(1000, 0);
        let to = account(1001, 200);

        let result = from.transfer(&to, 1);

        assert_eq!(result, Err(LedgerError::insufficient_funds(1000, 0, 1)));
        assert_eq!(from.balance(), 0);
        assert_eq!(to.balance(), 200);
    }

    #[test]
    fn test_transfer_to_self_is_rejected() {
        let acc = account(1000, 100);

        assert_eq!(acc.transfer(&acc, 10), Err(LedgerError::self_transfer(1000)));
        assert_eq!(acc.balance(), 100);
    }

    #[test]
    fn test_transfer_overflow_changes_nothing() {
        let from = account(1000, 10);
        let to = account(1001, Amount::MAX);

        let result = from.transfer(&to, 10);

        assert!(matches!(
            result,
            Err(LedgerError::ArithmeticOverflow { account: 1001, .. })
        ));
        assert_eq!(from.balance(), 10);
        assert_eq!(to.balance(), Amount::MAX);
    }

    #[test]
    fn test_transfer_rejects_non_positive_amount() {
        let from = account(1000, 10);
        let to = account(1001, 10);

        assert_eq!(from.transfer(&to, 0), Err(LedgerError::invalid_amount(0)));
        assert_eq!(from.balance(), 10);
        assert_eq!(to.balance(), 10);
    }

    #[test]
    fn test_opposite_transfers_do_not_deadlock() {
        let a = Arc::new(account(1000, 1_000));
        let b = Arc::new(account(1001, 1_000));

        let forward = {
            let (a, b) = (Arc::clone(&a), Arc::clone(&b));
            thread::spawn(move || {
                for _ in 0..10_000 {
                    let _ = a.transfer(&b, 1);
                }
            })
        };
        let backward = {
            let (a, b) = (Arc::clone(&a), Arc::clone(&b));
            thread::spawn(move || {
                for _ in 0..10_000 {
                    let _ = b.transfer(&a, 1);
                }
            })
        };

        forward.join().unwrap();
        backward.join().unwrap();

        assert_eq!(a.balance() + b.balance(), 2_000);
        assert!(a.balance() >= 0);
        assert!(b.balance() >= 0);
    }
}
