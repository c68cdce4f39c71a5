pub mod balance_service;
pub mod swap_approve_service;
pub mod transaction_manager;

pub use balance_service::{BalanceSubscription, TokenBalancesService};
pub use swap_approve_service::{SlippageSource, SwapApproveAmountService};
pub use transaction_manager::{
    InMemoryTransactionManager, TransactionManager, TransactionRefreshService,
    TransactionStatusFetcher,
};
