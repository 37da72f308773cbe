//! Parallel batch processing with source-account partitioning
//!
//! The `BatchProcessor` runs a batch of operations across tokio worker tasks
//! while keeping the order of operations initiated against the same account.
//!
//! # Partitioning
//!
//! A batch is split by [`Operation::source_account`]. Each partition runs
//! sequentially on its own task; partitions run in parallel. A transfer
//! therefore races with operations of its destination's partition, which is
//! where the per-account locks and their canonical order matter.
//!
//! `Open` operations have no source account and must not be handed to this
//! processor; callers apply them in order between batches so account ids stay
//! deterministic.

use crate::core::engine::LedgerEngine;
use crate::types::{AccountId, LedgerError, Operation, Outcome};
use std::collections::HashMap;
use tracing::error;

/// Outcome of one operation processed in a batch
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The operation as submitted
    pub operation: Operation,
    /// What the engine returned for it
    pub result: Result<Outcome, LedgerError>,
}

/// Batch processor over a shared engine
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    engine: LedgerEngine,
}

impl BatchProcessor {
    pub fn new(engine: LedgerEngine) -> Self {
        Self { engine }
    }

    /// Group a batch by source account, keeping per-account order
    ///
    /// Operations without a source account (opens) are dropped with an error log.
    pub fn partition_by_source(&self, batch: Vec<Operation>) -> HashMap<AccountId, Vec<Operation>> {
        let mut partitions: HashMap<AccountId, Vec<Operation>> = HashMap::new();

        for operation in batch {
            match operation.source_account() {
                Some(account) => partitions.entry(account).or_default().push(operation),
                None => error!(?operation, "open operation submitted to batch processor"),
            }
        }

        partitions
    }

    /// Run one partition's operations in order
    pub fn process_partition(&self, operations: Vec<Operation>) -> Vec<ProcessingResult> {
        operations
            .into_iter()
            .map(|operation| {
                let result = self.engine.process(operation.clone());
                ProcessingResult { operation, result }
            })
            .collect()
    }

    /// Process a batch with one task per source account
    ///
    /// # Returns
    ///
    /// One result per processed operation. Results of the same source account
    /// keep their input order; partitions are concatenated in no particular
    /// order.
    pub async fn process_batch(&self, batch: Vec<Operation>) -> Vec<ProcessingResult> {
        let partitions = self.partition_by_source(batch);

        let tasks: Vec<_> = partitions
            .into_values()
            .map(|operations| {
                let processor = self.clone();
                tokio::spawn(async move { processor.process_partition(operations) })
            })
            .collect();

        let mut results = Vec::new();
        for joined in futures::future::join_all(tasks).await {
            match joined {
                Ok(partition_results) => results.extend(partition_results),
                Err(e) => error!(error = %e, "batch task panicked"),
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionType;

    fn engine_with_accounts(balances: &[i64]) -> LedgerEngine {
        let engine = LedgerEngine::new();
        for (index, balance) in balances.iter().enumerate() {
            engine
                .ledger()
                .create_account(&format!("Holder {}", index), "Savings", *balance)
                .unwrap();
        }
        engine
    }

    #[test]
    fn test_partition_by_source_keeps_order() {
        let processor = BatchProcessor::new(engine_with_accounts(&[0, 0]));
        let batch = vec![
            Operation::Deposit { account: 1000, amount: 1 },
            Operation::Transfer { from: 1001, to: 1000, amount: 2 },
            Operation::Withdraw { account: 1000, amount: 3 },
            Operation::Open {
                name: "Late".to_string(),
                kind: "Savings".to_string(),
                initial_balance: 0,
            },
        ];

        let partitions = processor.partition_by_source(batch);

        assert_eq!(partitions.len(), 2);
        assert_eq!(
            partitions[&1000],
            vec![
                Operation::Deposit { account: 1000, amount: 1 },
                Operation::Withdraw { account: 1000, amount: 3 },
            ]
        );
        assert_eq!(
            partitions[&1001],
            vec![Operation::Transfer { from: 1001, to: 1000, amount: 2 }]
        );
    }

    #[test]
    fn test_process_partition_runs_in_order() {
        let engine = engine_with_accounts(&[0]);
        let processor = BatchProcessor::new(engine.clone());

        let results = processor.process_partition(vec![
            Operation::Deposit { account: 1000, amount: 10 },
            Operation::Withdraw { account: 1000, amount: 10 },
            Operation::Withdraw { account: 1000, amount: 1 },
        ]);

        assert!(results[0].result.is_ok());
        assert!(results[1].result.is_ok());
        assert_eq!(
            results[2].result,
            Err(LedgerError::insufficient_funds(1000, 0, 1))
        );
        assert_eq!(engine.ledger().list_transactions().len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_process_batch_conserves_funds() {
        let engine = engine_with_accounts(&[500, 500, 500, 500]);
        let processor = BatchProcessor::new(engine.clone());

        let mut batch = Vec::new();
        for round in 0..200u32 {
            let from = 1000 + round % 4;
            let to = 1000 + (round + 1) % 4;
            batch.push(Operation::Transfer { from, to, amount: 7 });
            batch.push(Operation::Transfer { from: to, to: from, amount: 5 });
        }

        let results = processor.process_batch(batch).await;

        assert_eq!(results.len(), 400);
        assert_eq!(engine.ledger().total_balance(), 2_000);
        assert!(engine
            .ledger()
            .list_accounts()
            .iter()
            .all(|account| account.balance >= 0));

        let succeeded = results.iter().filter(|r| r.result.is_ok()).count();
        let log = engine.ledger().list_transactions();
        assert_eq!(log.len(), succeeded);
        assert!(log.iter().all(|tx| tx.tx_type == TransactionType::Transfer));
    }
}
