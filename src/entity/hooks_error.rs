#[derive(Debug, thiserror::Error)]
pub enum HooksError {
    #[error("Invalid uint256 value: {0}")]
    InvalidUint256(String),

    #[error("Invalid slippage tolerance: {0}")]
    InvalidSlippage(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("Contract call error: {0}")]
    ContractCall(String),

    #[error("Failed to fetch transaction status: {0}")]
    StatusFetch(String),
}
