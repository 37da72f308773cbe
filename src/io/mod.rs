//! I/O module
//!
//! Handles operation script parsing and ledger output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, output serialization)
//! - `script_reader` - Operation script reader with iterator interface

pub mod csv_format;
pub mod script_reader;

pub use csv_format::{
    convert_script_record, write_accounts_csv, write_transactions_csv, ScriptRecord,
};
pub use script_reader::ScriptReader;
