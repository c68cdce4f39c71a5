use std::sync::Arc;

use crate::config::Config;
use crate::interactor::balance_interactor::{BalanceInteractor, BalanceInteractorImpl};
use crate::services::balance_service::TokenBalancesService;
use crate::services::swap_approve_service::{SlippageSource, SwapApproveAmountService};
use crate::services::transaction_manager::{
    InMemoryTransactionManager, TransactionRefreshService, TransactionStatusFetcher,
};
use crate::starknet::ContractCaller;

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    // Chain access
    caller: Arc<dyn ContractCaller>,

    // Business logic
    balance_interactor: Arc<dyn BalanceInteractor>,
    transaction_manager: Arc<InMemoryTransactionManager>,

    // Configuration
    config: Config,
}

impl ServiceContainer {
    /// Create a new service container with essential dependencies
    pub fn new(
        caller: Arc<dyn ContractCaller>,
        status_fetcher: Arc<dyn TransactionStatusFetcher>,
        config: Config,
    ) -> Self {
        let balance_interactor =
            Arc::new(BalanceInteractorImpl::new(caller.clone())) as Arc<dyn BalanceInteractor>;

        let transaction_manager = Arc::new(InMemoryTransactionManager::new(status_fetcher));

        Self {
            caller,
            balance_interactor,
            transaction_manager,
            config,
        }
    }

    // Factories for reactive services

    pub fn token_balances_service(&self) -> TokenBalancesService {
        TokenBalancesService::new(self.caller.clone())
    }

    pub fn swap_approve_service(&self) -> SwapApproveAmountService {
        SwapApproveAmountService::new()
    }

    /// Slippage source using the configured tolerance
    pub fn default_slippage(&self) -> SlippageSource {
        SlippageSource::Fixed(self.config.allowed_slippage_bips as f64)
    }

    pub fn transaction_refresh_service(&self) -> TransactionRefreshService {
        TransactionRefreshService::new(
            self.transaction_manager.clone(),
            self.config.tx_refresh_interval,
        )
    }

    // Accessor methods

    pub fn caller(&self) -> Arc<dyn ContractCaller> {
        self.caller.clone()
    }

    pub fn balance_interactor(&self) -> Arc<dyn BalanceInteractor> {
        self.balance_interactor.clone()
    }

    pub fn transaction_manager(&self) -> Arc<InMemoryTransactionManager> {
        self.transaction_manager.clone()
    }

    pub fn config(&self) -> Config {
        self.config.clone()
    }
}
