use crate::strategy::WorkerConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Replay an operation script against an in-memory bank ledger
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "Replay an operation script against an in-memory bank ledger", long_about = None)]
pub struct CliArgs {
    /// Operation script (CSV: op,account,to,amount,name,kind)
    #[arg(value_name = "INPUT", help = "Path to the operation script CSV file")]
    pub input_file: PathBuf,

    /// Processing strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for file order or 'concurrent' for parallel workers"
    )]
    pub strategy: StrategyType,

    /// Maximum operations per parallel segment (concurrent mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Maximum operations per parallel segment (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (concurrent mode only)
    #[arg(
        long = "workers",
        value_name = "COUNT",
        help = "Number of worker threads (default: CPU cores)"
    )]
    pub workers: Option<usize>,

    /// Where to write the transaction log CSV
    #[arg(
        long = "transactions-out",
        value_name = "PATH",
        help = "Write the transaction log as CSV to this file"
    )]
    pub transactions_out: Option<PathBuf>,
}

/// Available processing strategies
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Concurrent,
}

impl CliArgs {
    /// Build a WorkerConfig from the CLI arguments, defaulting what is unset
    pub fn to_worker_config(&self) -> WorkerConfig {
        let default = WorkerConfig::default();
        WorkerConfig::new(
            self.batch_size.unwrap_or(default.batch_size),
            self.workers.unwrap_or(default.workers),
        )
    }
}
