//! Account-related types for the bank ledger
//!
//! The live, lock-guarded account lives in [`crate::core::account`]. This module
//! holds the identifiers and the plain-data snapshot handed out to callers.

use serde::Serialize;
use std::fmt;

/// Account identifier
///
/// Assigned sequentially by the ledger, starting at [`FIRST_ACCOUNT_ID`].
pub type AccountId = u32;

/// Monetary amount in whole currency units
pub type Amount = i64;

/// Id given to the first account opened on a ledger
pub const FIRST_ACCOUNT_ID: AccountId = 1000;

/// Point-in-time copy of an account
///
/// Taken under the account's lock, so `balance` is never observed halfway
/// through a deposit, withdrawal or transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSnapshot {
    /// Account number
    pub id: AccountId,

    /// Holder name
    pub name: String,

    /// Account type, e.g. "Savings" or "Current"
    #[serde(rename = "type")]
    pub kind: String,

    /// Balance at the time of the snapshot (never negative)
    pub balance: Amount,
}

impl fmt::Display for AccountSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Account Number: {}", self.id)?;
        writeln!(f, "Account Name: {}", self.name)?;
        writeln!(f, "Balance: {}", self.balance)?;
        write!(f, "Account Type: {}", self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_display_layout() {
        let snapshot = AccountSnapshot {
            id: 1000,
            name: "Alice".to_string(),
            kind: "Savings".to_string(),
            balance: 150,
        };

        assert_eq!(
            snapshot.to_string(),
            "Account Number: 1000\nAccount Name: Alice\nBalance: 150\nAccount Type: Savings"
        );
    }
}
