use anyhow::Result;
use async_trait::async_trait;

/// A single read-only contract invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub contract_address: String,
    pub method: String,
    pub calldata: Vec<String>,
}

/// Batched contract reads, provided by the RPC layer
#[async_trait]
pub trait ContractCaller: Send + Sync {
    /// Execute `calls` and return one result per call, in the same order.
    ///
    /// `None` marks a call that produced no data.
    async fn call_contracts(&self, calls: Vec<ContractCall>) -> Result<Vec<Option<Vec<String>>>>;
}

/// Snapshot of a batched read: per-call felts plus the in-flight flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallStates {
    pub data: Vec<Option<Vec<String>>>,
    pub loading: bool,
}

impl CallStates {
    pub fn loading() -> Self {
        Self {
            data: Vec::new(),
            loading: true,
        }
    }

    pub fn resolved(data: Vec<Option<Vec<String>>>) -> Self {
        Self {
            data,
            loading: false,
        }
    }
}
