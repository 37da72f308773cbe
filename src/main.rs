//! Bank ledger CLI
//!
//! Replays an operation script against an in-memory ledger.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- operations.csv > accounts.csv
//! cargo run -- --strategy concurrent --workers 8 operations.csv > accounts.csv
//! cargo run -- --transactions-out log.csv operations.csv > accounts.csv
//! ```
//!
//! Final accounts go to stdout as CSV. Rejected operations and malformed rows
//! are logged to stderr (`RUST_LOG` controls verbosity).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing input file, unwritable output, etc.)

use bank_ledger::cli;
use bank_ledger::io::write_transactions_csv;
use bank_ledger::strategy;
use std::fs::File;
use std::io::BufWriter;
use std::process;

fn main() {
    cli::init_logging();

    let args = cli::parse_args();

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Concurrent) {
            Some(args.to_worker_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), config)
    };

    let mut output = std::io::stdout();
    let ledger = match strategy.process(&args.input_file, &mut output) {
        Ok(ledger) => ledger,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Some(path) = &args.transactions_out {
        let written = File::create(path)
            .map_err(bank_ledger::LedgerError::from)
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                write_transactions_csv(&ledger.list_transactions(), &mut writer)
            });
        if let Err(e) = written {
            eprintln!("Error: failed to write '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}
