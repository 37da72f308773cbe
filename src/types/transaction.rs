//! Transaction-related types for the bank ledger
//!
//! A [`Transaction`] is the immutable audit record the ledger appends after a
//! deposit, withdrawal or transfer has succeeded.

use super::account::{AccountId, Amount};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;

/// Transaction identifier
///
/// Assigned by the transaction log, starting at 1 and increasing by one per record.
pub type TransactionId = u64;

/// Kinds of completed operations the log records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TransactionType {
    /// Funds credited to an account
    Deposit,

    /// Funds debited from an account
    Withdraw,

    /// Funds moved from one account to another
    Transfer,
}

impl TransactionType {
    /// Label used in displays and CSV output
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "Deposit",
            TransactionType::Withdraw => "Withdraw",
            TransactionType::Transfer => "Transfer",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completed operation, as stored in the transaction log
///
/// Built once by the log at record time and never mutated afterwards. Callers
/// receive clones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// Sequential id assigned by the log
    pub id: TransactionId,

    /// Which operation completed
    #[serde(rename = "type")]
    pub tx_type: TransactionType,

    /// Amount moved (always positive)
    pub amount: Amount,

    /// Account the operation was initiated against
    #[serde(rename = "from")]
    pub from_account: AccountId,

    /// Receiving account for transfers, `None` for deposits and withdrawals
    #[serde(rename = "to")]
    pub to_account: Option<AccountId>,

    /// Wall-clock time the record was built
    pub timestamp: DateTime<Local>,
}

impl Transaction {
    /// Build a record stamped with the current local time
    pub fn new(
        id: TransactionId,
        tx_type: TransactionType,
        amount: Amount,
        from_account: AccountId,
        to_account: Option<AccountId>,
    ) -> Self {
        Transaction {
            id,
            tx_type,
            amount,
            from_account,
            to_account,
            timestamp: Local::now(),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Transaction ID: {}", self.id)?;
        writeln!(f, "Type: {}", self.tx_type)?;
        writeln!(f, "Amount: {}", self.amount)?;
        writeln!(f, "From Account: {}", self.from_account)?;
        match self.to_account {
            Some(to) => writeln!(f, "To Account: {}", to)?,
            None => writeln!(f, "To Account: N/A")?,
        }
        write!(f, "Time: {}", self.timestamp.format("%a %b %e %H:%M:%S %Y"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TransactionType::Deposit, "Deposit")]
    #[case(TransactionType::Withdraw, "Withdraw")]
    #[case(TransactionType::Transfer, "Transfer")]
    fn test_transaction_type_labels(#[case] tx_type: TransactionType, #[case] expected: &str) {
        assert_eq!(tx_type.to_string(), expected);
    }

    #[test]
    fn test_display_without_destination_shows_na() {
        let tx = Transaction::new(1, TransactionType::Deposit, 50, 1000, None);
        let rendered = tx.to_string();

        assert!(rendered.starts_with("Transaction ID: 1\nType: Deposit\nAmount: 50\n"));
        assert!(rendered.contains("From Account: 1000\n"));
        assert!(rendered.contains("To Account: N/A\n"));
        assert!(rendered.contains("Time: "));
    }

    #[test]
    fn test_display_with_destination() {
        let tx = Transaction::new(7, TransactionType::Transfer, 150, 1000, Some(1001));

        assert!(tx.to_string().contains("To Account: 1001\n"));
    }
}
