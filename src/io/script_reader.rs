//! Operation script reader with iterator interface
//!
//! Streams [`Operation`]s out of a CSV script, delegating format concerns to
//! the csv_format module.
//!
//! ```no_run
//! use bank_ledger::io::ScriptReader;
//! use std::path::Path;
//!
//! let reader = ScriptReader::open(Path::new("operations.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(operation) => println!("{:?}", operation),
//!         Err(e) => eprintln!("Skipping row: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors, unreadable header row) are
//!   returned from `open()` and `from_reader()`
//! - Row-level errors are yielded as `Err` items, tagged with the line number,
//!   and iteration continues with the next row

use crate::io::csv_format::{convert_script_record, ScriptRecord};
use crate::types::{LedgerError, Operation};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Streaming reader over an operation script
#[derive(Debug)]
pub struct ScriptReader<R: Read> {
    reader: csv::Reader<R>,
    headers: StringRecord,
    done: bool,
}

impl ScriptReader<File> {
    /// Open a script file and read its header row
    ///
    /// # Errors
    ///
    /// * `FileNotFound` if the path does not exist
    /// * `IoError` for any other failure to open it
    /// * `ParseError` if the header row cannot be read
    pub fn open(path: &Path) -> Result<Self, LedgerError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LedgerError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => LedgerError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), e),
            },
        })?;

        Self::from_reader(file)
    }
}

impl<R: Read> ScriptReader<R> {
    /// Read a script from any reader
    ///
    /// Whitespace is trimmed from every field and short rows are accepted;
    /// missing trailing columns read as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the header row cannot be read. A script without a
    /// usable header has no rows that can be interpreted.
    pub fn from_reader(input: R) -> Result<Self, LedgerError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(input);

        let headers = reader.headers()?.clone();

        Ok(Self {
            reader,
            headers,
            done: false,
        })
    }
}

impl<R: Read> Iterator for ScriptReader<R> {
    type Item = Result<Operation, LedgerError>;

    /// Read and convert the next script row
    ///
    /// Conversion errors are tagged with the row's line number. An I/O error
    /// is yielded once and ends the iteration.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut row = StringRecord::new();
        match self.reader.read_record(&mut row) {
            Ok(true) => {}
            Ok(false) => {
                self.done = true;
                return None;
            }
            Err(e) => {
                if e.is_io_error() {
                    self.done = true;
                }
                return Some(Err(e.into()));
            }
        }
        let line = row.position().map(|pos| pos.line());

        let operation = row
            .deserialize::<ScriptRecord>(Some(&self.headers))
            .map_err(LedgerError::from)
            .and_then(convert_script_record)
            .map_err(|e| match e {
                LedgerError::ParseError { line: None, message } => {
                    LedgerError::parse_error(line, message)
                }
                other => other,
            });

        Some(operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_reads_all_operation_kinds() {
        let script = "op,account,to,amount,name,kind\n\
                      open,,,100,Alice,Savings\n\
                      deposit,1000,,50,,\n\
                      withdraw,1000,,20,,\n\
                      transfer,1000,1001,30,,\n";

        let operations: Vec<_> = ScriptReader::from_reader(script.as_bytes())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            operations,
            vec![
                Operation::Open {
                    name: "Alice".to_string(),
                    kind: "Savings".to_string(),
                    initial_balance: 100,
                },
                Operation::Deposit { account: 1000, amount: 50 },
                Operation::Withdraw { account: 1000, amount: 20 },
                Operation::Transfer { from: 1000, to: 1001, amount: 30 },
            ]
        );
    }

    #[test]
    fn test_trims_whitespace_and_accepts_short_rows() {
        let script = "op,account,to,amount,name,kind\n \
                      deposit , 1000 , , 50\n";

        let operations: Vec<_> = ScriptReader::from_reader(script.as_bytes())
            .unwrap()
            .collect();

        assert_eq!(
            operations,
            vec![Ok(Operation::Deposit { account: 1000, amount: 50 })]
        );
    }

    #[test]
    fn test_bad_rows_are_yielded_as_errors_and_reading_continues() {
        let script = "op,account,to,amount,name,kind\n\
                      close,1000,,,,\n\
                      deposit,1000,,abc,,\n\
                      deposit,1000,,5,,\n";

        let results: Vec<_> = ScriptReader::from_reader(script.as_bytes())
            .unwrap()
            .collect();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0], Err(LedgerError::invalid_operation("close")));
        assert!(matches!(
            results[1],
            Err(LedgerError::ParseError { line: Some(3), .. })
        ));
        assert_eq!(results[2], Ok(Operation::Deposit { account: 1000, amount: 5 }));
    }

    #[test]
    fn test_open_reads_file() {
        let file = create_temp_csv("op,account,to,amount,name,kind\nopen,,,0,Carol,Current\n");

        let operations: Vec<_> = ScriptReader::open(file.path()).unwrap().collect();

        assert_eq!(operations.len(), 1);
        assert!(operations[0].as_ref().unwrap().is_open());
    }

    #[test]
    fn test_open_missing_file() {
        let result = ScriptReader::open(Path::new("does/not/exist.csv"));

        assert!(matches!(result, Err(LedgerError::FileNotFound { .. })));
    }

    #[test]
    fn test_unreadable_header_is_fatal() {
        let script: &[u8] = b"op,acc\xffount,to,amount,name,kind\ndeposit,1000,,5,,\n";

        let result = ScriptReader::from_reader(script);

        match result {
            Err(LedgerError::ParseError { line, message }) => {
                assert_eq!(line, Some(1));
                assert!(!message.starts_with("CSV"), "message: {}", message);
            }
            other => panic!("Expected ParseError, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_open_file_with_unreadable_header_is_fatal() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(b"\xfe\xffop,account\n")
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");

        let result = ScriptReader::open(file.path());

        assert!(matches!(result, Err(LedgerError::ParseError { .. })));
    }

    #[test]
    fn test_empty_script_yields_nothing() {
        let mut reader = ScriptReader::from_reader(&b""[..]).unwrap();

        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
    }

    struct BrokenPipe;

    impl Read for BrokenPipe {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    #[test]
    fn test_io_error_ends_iteration() {
        let input = (&b"op,account,to,amount,name,kind\n"[..]).chain(BrokenPipe);
        let reader = ScriptReader::from_reader(input).unwrap();

        let results: Vec<_> = reader.take(10).collect();

        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(LedgerError::IoError { .. })));
    }
}
