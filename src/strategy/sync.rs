//! Synchronous processing strategy
//!
//! Single-threaded pipeline: rows are read one at a time and applied in file
//! order, so the result is fully deterministic (timestamps aside).

use crate::core::{Ledger, LedgerEngine};
use crate::io::csv_format::write_accounts_csv;
use crate::io::script_reader::ScriptReader;
use crate::strategy::ProcessingStrategy;
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Synchronous processing strategy
///
/// ```no_run
/// use bank_ledger::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
///
/// let mut output = std::io::stdout();
/// let ledger = SyncProcessingStrategy
///     .process(Path::new("operations.csv"), &mut output)
///     .expect("Processing failed");
/// println!("{} transactions recorded", ledger.list_transactions().len());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<Arc<Ledger>, LedgerError> {
        let engine = LedgerEngine::new();
        let reader = ScriptReader::open(input_path)?;

        for result in reader {
            match result {
                Ok(operation) => match engine.process(operation.clone()) {
                    Ok(outcome) => debug!(?operation, ?outcome, "operation applied"),
                    Err(e) => warn!(?operation, error = %e, "operation rejected"),
                },
                Err(e) => warn!(error = %e, "skipping malformed script row"),
            }
        }

        let ledger = engine.ledger();
        debug!(
            accounts = ledger.account_count(),
            transactions = ledger.transaction_count(),
            "script processed"
        );
        write_accounts_csv(&ledger.list_accounts(), output)?;

        Ok(Arc::clone(ledger))
    }
}
