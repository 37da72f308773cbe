//! CSV format handling for operation scripts and ledger output
//!
//! This module centralizes all CSV format concerns, providing:
//! - ScriptRecord structure for deserialization
//! - Conversion from script records to [`Operation`]s
//! - Account and transaction log serialization
//!
//! # Script Format
//!
//! ```text
//! op,account,to,amount,name,kind
//! open,,,100,Alice,Savings
//! deposit,1000,,50,,
//! withdraw,1000,,20,,
//! transfer,1000,1001,30,,
//! ```
//!
//! `op` is case-insensitive. An `open` row without an amount opens the account
//! with a zero balance.

use crate::types::{AccountId, AccountSnapshot, Amount, LedgerError, Operation, Transaction};
use csv::WriterBuilder;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Every column is optional at this stage; which ones are required depends on
/// the operation and is checked by [`convert_script_record`].
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ScriptRecord {
    pub op: String,
    pub account: Option<String>,
    pub to: Option<String>,
    pub amount: Option<String>,
    pub name: Option<String>,
    pub kind: Option<String>,
}

/// Convert a ScriptRecord to an Operation
///
/// Amount values are passed through unvalidated; rejecting zero or negative
/// amounts is the ledger's job.
///
/// # Errors
///
/// - `InvalidOperation` for an unknown `op`
/// - `MissingField` when a required column is empty
/// - `ParseError` when a numeric column is not an integer
pub fn convert_script_record(record: ScriptRecord) -> Result<Operation, LedgerError> {
    let op = record.op.trim().to_lowercase();

    match op.as_str() {
        "open" => Ok(Operation::Open {
            name: require_text(&op, "name", record.name)?,
            kind: require_text(&op, "kind", record.kind)?,
            initial_balance: parse_optional::<Amount>("amount", record.amount)?.unwrap_or(0),
        }),
        "deposit" => Ok(Operation::Deposit {
            account: require_number(&op, "account", record.account)?,
            amount: require_number(&op, "amount", record.amount)?,
        }),
        "withdraw" | "withdrawal" => Ok(Operation::Withdraw {
            account: require_number(&op, "account", record.account)?,
            amount: require_number(&op, "amount", record.amount)?,
        }),
        "transfer" => Ok(Operation::Transfer {
            from: require_number::<AccountId>(&op, "account", record.account)?,
            to: require_number(&op, "to", record.to)?,
            amount: require_number(&op, "amount", record.amount)?,
        }),
        _ => Err(LedgerError::invalid_operation(&record.op)),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn require_text(op: &str, field: &str, value: Option<String>) -> Result<String, LedgerError> {
    non_empty(value).ok_or_else(|| LedgerError::missing_field(op, field))
}

fn parse_optional<T: FromStr>(field: &str, value: Option<String>) -> Result<Option<T>, LedgerError> {
    match non_empty(value) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| LedgerError::parse_error(None, format!("invalid {} '{}'", field, raw))),
        None => Ok(None),
    }
}

fn require_number<T: FromStr>(op: &str, field: &str, value: Option<String>) -> Result<T, LedgerError> {
    parse_optional(field, value)?.ok_or_else(|| LedgerError::missing_field(op, field))
}

fn write_error(e: impl std::fmt::Display) -> LedgerError {
    LedgerError::IoError {
        message: format!("Failed to write CSV output: {}", e),
    }
}

/// Write account snapshots to CSV format
///
/// Columns: id, name, type, balance. Rows are sorted by account id. The header
/// is written even when there are no accounts.
pub fn write_accounts_csv(
    accounts: &[AccountSnapshot],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);

    writer
        .write_record(["id", "name", "type", "balance"])
        .map_err(write_error)?;

    let mut sorted_accounts: Vec<&AccountSnapshot> = accounts.iter().collect();
    sorted_accounts.sort_by_key(|account| account.id);

    for account in sorted_accounts {
        writer.serialize(account).map_err(write_error)?;
    }

    writer.flush().map_err(write_error)?;
    Ok(())
}

/// Write the transaction log to CSV format
///
/// Columns: id, type, amount, from, to, timestamp. `to` is empty for deposits
/// and withdrawals; timestamps are RFC 3339. Rows keep log order.
pub fn write_transactions_csv(
    transactions: &[Transaction],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);

    writer
        .write_record(["id", "type", "amount", "from", "to", "timestamp"])
        .map_err(write_error)?;

    for tx in transactions {
        writer.serialize(tx).map_err(write_error)?;
    }

    writer.flush().map_err(write_error)?;
    Ok(())
}
