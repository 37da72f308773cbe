//! Processing strategy module for operation scripts
//!
//! A strategy is a complete pipeline: read an operation script, drive it
//! through a [`LedgerEngine`](crate::core::LedgerEngine), write the final
//! accounts. Strategies are selected at runtime.

use crate::cli::StrategyType;
use crate::core::Ledger;
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

pub mod concurrent;
pub mod sync;

pub use concurrent::{ConcurrentProcessingStrategy, WorkerConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete script pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Process an operation script and write the final accounts as CSV
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the operation script
    /// * `output` - Writer receiving the accounts CSV
    ///
    /// # Returns
    ///
    /// The ledger after all operations ran, so callers can inspect it or dump
    /// its transaction log.
    ///
    /// # Errors
    ///
    /// Returns an error if the script cannot be opened, the runtime cannot be
    /// started or the output cannot be written. Rejected operations and
    /// malformed rows are logged and skipped; they never fail the run.
    fn process(&self, input_path: &Path, output: &mut dyn Write)
        -> Result<Arc<Ledger>, LedgerError>;
}

/// Create a processing strategy
///
/// `config` is only used by the concurrent strategy; `None` means defaults.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<WorkerConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Concurrent => {
            let config = config.unwrap_or_default();
            Box::new(ConcurrentProcessingStrategy::new(config))
        }
    }
}
