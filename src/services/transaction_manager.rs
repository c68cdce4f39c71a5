use crate::entity::{
    HooksError, Transaction, TransactionRefreshData, TransactionStatus, TransactionSubmitted,
};
use crate::utils::shorten_address;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::select;
use tokio::sync::{mpsc, watch};
use tokio::time::interval;

/// Tracks transactions the user submitted
#[async_trait]
pub trait TransactionManager: Send + Sync {
    async fn add_transaction(&self, transaction: TransactionSubmitted);

    async fn remove_transaction(&self, transaction_hash: &str);

    /// Re-poll the status of a tracked transaction
    async fn refresh_transaction(&self, transaction_hash: &str) -> Result<TransactionRefreshData>;

    async fn clear_transactions(&self);
}

/// Source of transaction statuses, provided by the RPC layer
#[async_trait]
pub trait TransactionStatusFetcher: Send + Sync {
    async fn get_transaction_status(&self, transaction_hash: &str) -> Result<TransactionStatus>;
}

/// Transaction manager that keeps its list in memory.
///
/// The list is held in a watch channel so the history UI can subscribe to it.
pub struct InMemoryTransactionManager {
    fetcher: Arc<dyn TransactionStatusFetcher>,
    transactions: watch::Sender<Vec<Transaction>>,
}

impl InMemoryTransactionManager {
    pub fn new(fetcher: Arc<dyn TransactionStatusFetcher>) -> Self {
        let (transactions, _) = watch::channel(Vec::new());
        Self {
            fetcher,
            transactions,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Transaction>> {
        self.transactions.subscribe()
    }

    /// Tracked transactions in submission order
    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.borrow().clone()
    }

    pub fn get(&self, transaction_hash: &str) -> Option<Transaction> {
        self.transactions
            .borrow()
            .iter()
            .find(|tx| tx.transaction_hash() == transaction_hash)
            .cloned()
    }

    /// Refresh every transaction that has not settled yet
    pub async fn refresh_pending(&self) -> Vec<TransactionRefreshData> {
        let pending: Vec<String> = self
            .transactions
            .borrow()
            .iter()
            .filter(|tx| tx.loading())
            .map(|tx| tx.transaction_hash().to_string())
            .collect();

        if pending.is_empty() {
            return Vec::new();
        }

        debug!("Refreshing {} pending transactions", pending.len());

        let results = join_all(pending.iter().map(|hash| self.refresh_transaction(hash))).await;

        results
            .into_iter()
            .zip(pending.iter())
            .filter_map(|(result, hash)| match result {
                Ok(data) => Some(data),
                Err(e) => {
                    warn!("Failed to refresh transaction {}: {}", hash, e);
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl TransactionManager for InMemoryTransactionManager {
    async fn add_transaction(&self, transaction: TransactionSubmitted) {
        info!(
            "Tracking transaction {} ({})",
            shorten_address(&transaction.transaction_hash),
            transaction.status
        );

        let transaction = Transaction::submitted(transaction, Utc::now());
        self.transactions.send_modify(|list| {
            match list
                .iter_mut()
                .find(|tx| tx.transaction_hash() == transaction.transaction_hash())
            {
                Some(existing) => *existing = transaction,
                None => list.push(transaction),
            }
        });
    }

    async fn remove_transaction(&self, transaction_hash: &str) {
        self.transactions.send_if_modified(|list| {
            let before = list.len();
            list.retain(|tx| tx.transaction_hash() != transaction_hash);
            list.len() != before
        });
    }

    async fn refresh_transaction(&self, transaction_hash: &str) -> Result<TransactionRefreshData> {
        if self.get(transaction_hash).is_none() {
            return Err(HooksError::TransactionNotFound(transaction_hash.to_string()).into());
        }

        let status = self
            .fetcher
            .get_transaction_status(transaction_hash)
            .await
            .map_err(|e| HooksError::StatusFetch(e.to_string()))?;

        // the entry may have been removed or re-added while the status was in flight,
        // so the update is built from what is stored now
        let now = Utc::now();
        let mut refreshed = None;
        self.transactions.send_if_modified(|list| {
            match list
                .iter_mut()
                .find(|tx| tx.transaction_hash() == transaction_hash)
            {
                Some(existing) => {
                    let updated = existing.received(status, now);
                    let previous = std::mem::replace(existing, updated.clone());
                    refreshed = Some((previous, updated));
                    true
                }
                None => false,
            }
        });

        let Some((old_transaction, new_transaction)) = refreshed else {
            return Err(HooksError::TransactionNotFound(transaction_hash.to_string()).into());
        };

        if old_transaction.status() != status {
            info!(
                "Transaction {} moved from {} to {}",
                shorten_address(transaction_hash),
                old_transaction.status(),
                status
            );
        }

        Ok(TransactionRefreshData {
            old_transaction,
            new_transaction,
        })
    }

    async fn clear_transactions(&self) {
        self.transactions.send_modify(|list| list.clear());
    }
}

/// Background polling of transactions that have not settled yet
pub struct TransactionRefreshService {
    manager: Arc<InMemoryTransactionManager>,
    period: Duration,
    stop_tx: Option<mpsc::Sender<()>>,
}

impl TransactionRefreshService {
    pub fn new(manager: Arc<InMemoryTransactionManager>, period: Duration) -> Self {
        Self {
            manager,
            period,
            stop_tx: None,
        }
    }

    pub async fn start(&mut self) -> Result<()> {
        if self.stop_tx.is_some() {
            warn!("Transaction refresh service is already running");
            return Ok(());
        }
        if self.period.is_zero() {
            return Err(anyhow!("Refresh interval must be greater than zero"));
        }

        let (stop_tx, mut stop_rx) = mpsc::channel::<()>(1);
        self.stop_tx = Some(stop_tx);

        let manager = self.manager.clone();
        let period = self.period;

        tokio::spawn(async move {
            let mut interval = interval(period);

            loop {
                select! {
                    _ = interval.tick() => {
                        let refreshed = manager.refresh_pending().await;
                        let settled = refreshed
                            .iter()
                            .filter(|data| !data.new_transaction.loading())
                            .count();
                        if settled > 0 {
                            debug!("{} transactions settled", settled);
                        }
                    }
                    _ = stop_rx.recv() => {
                        info!("Stopping transaction refresh service");
                        break;
                    }
                }
            }
        });

        info!("Transaction refresh service started");
        Ok(())
    }

    pub async fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            if tx.send(()).await.is_err() {
                error!("Transaction refresh service already exited");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{TransactionKind, TransactionMetadata};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio::sync::Notify;
    use tokio::time::timeout;

    #[derive(Default)]
    struct MockFetcher {
        statuses: Mutex<HashMap<String, TransactionStatus>>,
    }

    impl MockFetcher {
        fn set(&self, hash: &str, status: TransactionStatus) {
            self.statuses
                .lock()
                .unwrap()
                .insert(hash.to_string(), status);
        }
    }

    #[async_trait]
    impl TransactionStatusFetcher for MockFetcher {
        async fn get_transaction_status(&self, transaction_hash: &str) -> Result<TransactionStatus> {
            self.statuses
                .lock()
                .unwrap()
                .get(transaction_hash)
                .copied()
                .ok_or_else(|| anyhow!("unknown transaction {}", transaction_hash))
        }
    }

    /// Holds every status request until the test releases it
    #[derive(Default)]
    struct GatedFetcher {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl TransactionStatusFetcher for GatedFetcher {
        async fn get_transaction_status(&self, _transaction_hash: &str) -> Result<TransactionStatus> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(TransactionStatus::AcceptedOnL2)
        }
    }

    fn submitted(hash: &str) -> TransactionSubmitted {
        TransactionSubmitted {
            status: TransactionStatus::Received,
            transaction_hash: hash.to_string(),
            address: Some("0xa11ce".to_string()),
            metadata: Some(TransactionMetadata {
                method: Some("swapExactTokensForTokens".to_string()),
                message: Some("Swap 1 ETH for USDC".to_string()),
            }),
        }
    }

    fn manager() -> (Arc<MockFetcher>, InMemoryTransactionManager) {
        let fetcher = Arc::new(MockFetcher::default());
        let manager = InMemoryTransactionManager::new(fetcher.clone());
        (fetcher, manager)
    }

    #[tokio::test]
    async fn test_add_keeps_submission_order() {
        let (_, manager) = manager();
        manager.add_transaction(submitted("0x1")).await;
        manager.add_transaction(submitted("0x2")).await;

        let hashes: Vec<String> = manager
            .transactions()
            .iter()
            .map(|tx| tx.transaction_hash().to_string())
            .collect();
        assert_eq!(hashes, vec!["0x1", "0x2"]);
        assert!(manager.transactions().iter().all(|tx| tx.loading()));
    }

    #[tokio::test]
    async fn test_resubmitting_a_hash_replaces_it() {
        let (_, manager) = manager();
        manager.add_transaction(submitted("0x1")).await;
        manager.add_transaction(submitted("0x1")).await;
        assert_eq!(manager.transactions().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_only_affects_named_hash() {
        let (_, manager) = manager();
        manager.add_transaction(submitted("0x1")).await;
        manager.add_transaction(submitted("0x2")).await;

        manager.remove_transaction("0x1").await;
        manager.remove_transaction("0xmissing").await;

        assert!(manager.get("0x1").is_none());
        assert!(manager.get("0x2").is_some());
    }

    #[tokio::test]
    async fn test_clear_empties_manager() {
        let (_, manager) = manager();
        let rx = manager.subscribe();
        manager.add_transaction(submitted("0x1")).await;
        manager.clear_transactions().await;

        assert!(manager.transactions().is_empty());
        assert!(rx.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_turns_submission_into_received() {
        let (fetcher, manager) = manager();
        manager.add_transaction(submitted("0x1")).await;
        fetcher.set("0x1", TransactionStatus::AcceptedOnL2);

        let data = manager.refresh_transaction("0x1").await.unwrap();

        assert!(matches!(data.old_transaction.kind, TransactionKind::Submitted(_)));
        assert!(matches!(data.new_transaction.kind, TransactionKind::Received(_)));
        assert!(data.new_transaction.success());
        assert_eq!(data.new_transaction.created_at, data.old_transaction.created_at);

        let stored = manager.get("0x1").unwrap();
        assert_eq!(stored, data.new_transaction);
        assert!(stored.last_updated_at().is_some());
    }

    #[tokio::test]
    async fn test_refresh_unknown_hash_is_not_found() {
        let (_, manager) = manager();
        let err = manager.refresh_transaction("0xnope").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HooksError>(),
            Some(HooksError::TransactionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_refresh_fetch_failure_keeps_entry() {
        let (_, manager) = manager();
        manager.add_transaction(submitted("0x1")).await;

        let err = manager.refresh_transaction("0x1").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HooksError>(),
            Some(HooksError::StatusFetch(_))
        ));
        assert!(matches!(
            manager.get("0x1").unwrap().kind,
            TransactionKind::Submitted(_)
        ));
    }

    #[tokio::test]
    async fn test_refresh_pending_skips_settled() {
        let (fetcher, manager) = manager();
        manager.add_transaction(submitted("0x1")).await;
        manager.add_transaction(submitted("0x2")).await;
        fetcher.set("0x1", TransactionStatus::Rejected);
        fetcher.set("0x2", TransactionStatus::Pending);

        let refreshed = manager.refresh_pending().await;
        assert_eq!(refreshed.len(), 2);
        assert!(manager.get("0x1").unwrap().fail());

        // 0x1 is settled now, only 0x2 is polled again
        let refreshed = manager.refresh_pending().await;
        assert_eq!(refreshed.len(), 1);
        assert_eq!(refreshed[0].new_transaction.transaction_hash(), "0x2");
    }

    #[tokio::test]
    async fn test_refresh_service_settles_transactions() {
        let (fetcher, manager) = manager();
        let manager = Arc::new(manager);
        manager.add_transaction(submitted("0x1")).await;
        fetcher.set("0x1", TransactionStatus::AcceptedOnL1);

        let mut rx = manager.subscribe();
        let mut service = TransactionRefreshService::new(manager.clone(), Duration::from_millis(10));
        service.start().await.unwrap();

        timeout(
            Duration::from_secs(1),
            rx.wait_for(|list| list.iter().all(|tx| tx.success())),
        )
        .await
        .unwrap()
        .unwrap();

        service.stop().await;
    }

    #[tokio::test]
    async fn test_refresh_service_rejects_zero_interval() {
        let (_, manager) = manager();
        let mut service = TransactionRefreshService::new(Arc::new(manager), Duration::ZERO);
        assert!(service.start().await.is_err());
    }

    #[tokio::test]
    async fn test_refresh_keeps_entry_re_added_during_fetch() {
        let fetcher = Arc::new(GatedFetcher::default());
        let manager = Arc::new(InMemoryTransactionManager::new(fetcher.clone()));
        manager.add_transaction(submitted("0x1")).await;
        let first_created_at = manager.get("0x1").unwrap().created_at;

        let refresh = tokio::spawn({
            let manager = manager.clone();
            async move { manager.refresh_transaction("0x1").await }
        });
        timeout(Duration::from_secs(1), fetcher.entered.notified())
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;
        let mut resubmitted = submitted("0x1");
        resubmitted.metadata = Some(TransactionMetadata {
            method: Some("approve".to_string()),
            message: Some("Approve USDC".to_string()),
        });
        manager.add_transaction(resubmitted).await;
        let readded_at = manager.get("0x1").unwrap().created_at;
        assert_ne!(readded_at, first_created_at);

        fetcher.release.notify_one();
        let data = timeout(Duration::from_secs(1), refresh)
            .await
            .unwrap()
            .unwrap()
            .unwrap();

        assert_eq!(data.old_transaction.created_at, readded_at);
        assert_eq!(data.new_transaction.created_at, readded_at);
        assert_eq!(
            data.new_transaction.metadata().and_then(|m| m.method.as_deref()),
            Some("approve")
        );
        assert!(data.new_transaction.success());
        assert_eq!(manager.get("0x1").unwrap(), data.new_transaction);
        assert_eq!(manager.transactions().len(), 1);
    }
}
