use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a transaction as reported by the Starknet gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    NotReceived,
    Received,
    Pending,
    #[serde(rename = "ACCEPTED_ON_L2")]
    AcceptedOnL2,
    #[serde(rename = "ACCEPTED_ON_L1")]
    AcceptedOnL1,
    Rejected,
}

impl TransactionStatus {
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            TransactionStatus::NotReceived | TransactionStatus::Received | TransactionStatus::Pending
        )
    }

    pub fn is_success(&self) -> bool {
        matches!(
            self,
            TransactionStatus::AcceptedOnL2 | TransactionStatus::AcceptedOnL1
        )
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, TransactionStatus::Rejected)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::NotReceived => write!(f, "NOT_RECEIVED"),
            TransactionStatus::Received => write!(f, "RECEIVED"),
            TransactionStatus::Pending => write!(f, "PENDING"),
            TransactionStatus::AcceptedOnL2 => write!(f, "ACCEPTED_ON_L2"),
            TransactionStatus::AcceptedOnL1 => write!(f, "ACCEPTED_ON_L1"),
            TransactionStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionMetadata {
    pub method: Option<String>,
    pub message: Option<String>,
}

/// A transaction just handed to the network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSubmitted {
    pub status: TransactionStatus,
    pub transaction_hash: String,
    pub address: Option<String>,
    pub metadata: Option<TransactionMetadata>,
}

/// A transaction whose status has been polled at least once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceived {
    pub status: TransactionStatus,
    pub transaction_hash: String,
    pub last_updated_at: DateTime<Utc>,
    pub metadata: Option<TransactionMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransactionKind {
    Submitted(TransactionSubmitted),
    Received(TransactionReceived),
}

/// A tracked transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn submitted(submitted: TransactionSubmitted, created_at: DateTime<Utc>) -> Self {
        Self {
            kind: TransactionKind::Submitted(submitted),
            created_at,
        }
    }

    pub fn status(&self) -> TransactionStatus {
        match &self.kind {
            TransactionKind::Submitted(tx) => tx.status,
            TransactionKind::Received(tx) => tx.status,
        }
    }

    pub fn transaction_hash(&self) -> &str {
        match &self.kind {
            TransactionKind::Submitted(tx) => &tx.transaction_hash,
            TransactionKind::Received(tx) => &tx.transaction_hash,
        }
    }

    pub fn metadata(&self) -> Option<&TransactionMetadata> {
        match &self.kind {
            TransactionKind::Submitted(tx) => tx.metadata.as_ref(),
            TransactionKind::Received(tx) => tx.metadata.as_ref(),
        }
    }

    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        match &self.kind {
            TransactionKind::Submitted(_) => None,
            TransactionKind::Received(tx) => Some(tx.last_updated_at),
        }
    }

    pub fn loading(&self) -> bool {
        self.status().is_loading()
    }

    pub fn success(&self) -> bool {
        self.status().is_success()
    }

    pub fn fail(&self) -> bool {
        self.status().is_fail()
    }

    /// Copy of this transaction carrying a freshly polled status
    pub fn received(&self, status: TransactionStatus, updated_at: DateTime<Utc>) -> Self {
        Self {
            kind: TransactionKind::Received(TransactionReceived {
                status,
                transaction_hash: self.transaction_hash().to_string(),
                last_updated_at: updated_at,
                metadata: self.metadata().cloned(),
            }),
            created_at: self.created_at,
        }
    }
}

/// Before/after pair produced by a status refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRefreshData {
    pub old_transaction: Transaction,
    pub new_transaction: Transaction,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submitted(status: TransactionStatus) -> Transaction {
        Transaction::submitted(
            TransactionSubmitted {
                status,
                transaction_hash: "0xabc".to_string(),
                address: None,
                metadata: Some(TransactionMetadata {
                    method: Some("swap".to_string()),
                    message: None,
                }),
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_flags_follow_status() {
        let tx = submitted(TransactionStatus::Received);
        assert!(tx.loading() && !tx.success() && !tx.fail());

        let tx = submitted(TransactionStatus::AcceptedOnL2);
        assert!(!tx.loading() && tx.success() && !tx.fail());

        let tx = submitted(TransactionStatus::Rejected);
        assert!(!tx.loading() && !tx.success() && tx.fail());
    }

    #[test]
    fn test_received_keeps_hash_metadata_and_creation_time() {
        let tx = submitted(TransactionStatus::Received);
        let updated_at = tx.created_at + chrono::Duration::seconds(10);
        let received = tx.received(TransactionStatus::AcceptedOnL1, updated_at);

        assert_eq!(received.transaction_hash(), "0xabc");
        assert_eq!(received.created_at, tx.created_at);
        assert_eq!(received.last_updated_at(), Some(updated_at));
        assert_eq!(
            received.metadata().and_then(|m| m.method.as_deref()),
            Some("swap")
        );
        assert!(received.success());
    }

    #[test]
    fn test_status_uses_gateway_names() {
        let json = serde_json::to_string(&TransactionStatus::AcceptedOnL2).unwrap();
        assert_eq!(json, "\"ACCEPTED_ON_L2\"");

        let status: TransactionStatus = serde_json::from_str("\"NOT_RECEIVED\"").unwrap();
        assert_eq!(status, TransactionStatus::NotReceived);
    }
}
