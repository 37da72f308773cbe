//! Concurrent processing strategy
//!
//! Multi-threaded pipeline on a tokio runtime.
//!
//! # Architecture
//!
//! ```text
//! ConcurrentProcessingStrategy
//!     ├── WorkerConfig (batch_size, workers)
//!     ├── ScriptReader (streaming script rows)
//!     ├── BatchProcessor (source-account partitioning + tasks)
//!     └── LedgerEngine (shared, Arc<Ledger>)
//! ```
//!
//! # Segments
//!
//! Rows are collected into a segment until an `open` row arrives or the
//! segment reaches `batch_size`. The segment is then processed in parallel and
//! awaited. An `open` row is applied on its own after the preceding segment, so
//! account ids come out in file order and later rows can refer to them.
//!
//! Operations initiated against the same account keep their file order.
//! Operations on different accounts interleave, so a withdrawal may see a
//! credit from a concurrent transfer that comes later in the file.

use crate::core::{BatchProcessor, Ledger, LedgerEngine};
use crate::io::csv_format::write_accounts_csv;
use crate::io::script_reader::ScriptReader;
use crate::strategy::ProcessingStrategy;
use crate::types::{LedgerError, Operation};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Configuration for concurrent processing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Maximum number of operations per segment
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub workers: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            workers: num_cpus::get(),
        }
    }
}

impl WorkerConfig {
    /// Create a WorkerConfig, replacing zero values with defaults
    pub fn new(batch_size: usize, workers: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch_size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let workers = if workers == 0 {
            warn!(workers, default = default.workers, "invalid workers, using default");
            default.workers
        } else {
            workers
        };

        Self {
            batch_size,
            workers,
        }
    }
}

/// Concurrent processing strategy
#[derive(Debug, Clone)]
pub struct ConcurrentProcessingStrategy {
    config: WorkerConfig,
}

impl ConcurrentProcessingStrategy {
    pub fn new(config: WorkerConfig) -> Self {
        Self { config }
    }
}

async fn run_segment(processor: &BatchProcessor, segment: Vec<Operation>) {
    if segment.is_empty() {
        return;
    }

    for processed in processor.process_batch(segment).await {
        match processed.result {
            Ok(outcome) => debug!(operation = ?processed.operation, ?outcome, "operation applied"),
            Err(e) => warn!(operation = ?processed.operation, error = %e, "operation rejected"),
        }
    }
}

impl ProcessingStrategy for ConcurrentProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<Arc<Ledger>, LedgerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.workers)
            .build()
            .map_err(|e| LedgerError::RuntimeError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        let reader = ScriptReader::open(input_path)?;
        let engine = LedgerEngine::new();
        let processor = BatchProcessor::new(engine.clone());
        let batch_size = self.config.batch_size;

        runtime.block_on(async {
            let mut segment = Vec::with_capacity(batch_size);

            for result in reader {
                match result {
                    Ok(operation) if operation.is_open() => {
                        run_segment(&processor, std::mem::take(&mut segment)).await;
                        match engine.process(operation.clone()) {
                            Ok(outcome) => debug!(?operation, ?outcome, "operation applied"),
                            Err(e) => warn!(?operation, error = %e, "operation rejected"),
                        }
                    }
                    Ok(operation) => {
                        segment.push(operation);
                        if segment.len() >= batch_size {
                            run_segment(&processor, std::mem::take(&mut segment)).await;
                        }
                    }
                    Err(e) => warn!(error = %e, "skipping malformed script row"),
                }
            }

            run_segment(&processor, segment).await;
        });

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
