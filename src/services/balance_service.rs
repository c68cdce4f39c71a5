use crate::entity::{BalanceState, Token, TokenBalances};
use crate::interactor::balance_interactor::{
    any_loading, derive_balances, ordered_balances, validated_tokens,
};
use crate::starknet::{balance_of_calls, CallStates, ContractCaller};
use anyhow::Result;
use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::select;
use tokio::sync::{mpsc, watch};

type ReadResult = (u64, Result<Vec<Option<Vec<String>>>>);

/// Outputs of a running balance pipeline
#[derive(Clone)]
pub struct BalanceSubscription {
    pub balances: watch::Receiver<TokenBalances>,
    pub loading: watch::Receiver<bool>,
    pub ordered: watch::Receiver<Vec<BalanceState>>,
}

/// Keeps token balances of an account up to date while its inputs change
pub struct TokenBalancesService {
    caller: Arc<dyn ContractCaller>,
    stop_tx: Option<mpsc::Sender<()>>,
}

struct Pipeline {
    caller: Arc<dyn ContractCaller>,
    account: Option<String>,
    tokens: Vec<Option<Token>>,
    validated: Vec<Token>,
    generation: u64,
    read_pending: bool,
    result_tx: mpsc::Sender<ReadResult>,
    balances_tx: watch::Sender<TokenBalances>,
    loading_tx: watch::Sender<bool>,
    ordered_tx: watch::Sender<Vec<BalanceState>>,
}

impl TokenBalancesService {
    pub fn new(caller: Arc<dyn ContractCaller>) -> Self {
        Self {
            caller,
            stop_tx: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.stop_tx.is_some()
    }

    // Start watching `account` and `tokens`; balances are re-read on every change
    pub async fn start(
        &mut self,
        mut account_rx: watch::Receiver<Option<String>>,
        mut tokens_rx: watch::Receiver<Vec<Option<Token>>>,
    ) -> Result<BalanceSubscription> {
        if self.stop_tx.is_some() {
            return Err(anyhow::anyhow!("Balance service is already running"));
        }

        let (stop_tx, mut stop_rx) = mpsc::channel::<()>(1);
        self.stop_tx = Some(stop_tx);

        let (result_tx, mut result_rx) = mpsc::channel::<ReadResult>(16);
        let (balances_tx, balances_rx) = watch::channel(TokenBalances::new());
        let (loading_tx, loading_rx) = watch::channel(false);
        let (ordered_tx, ordered_rx) = watch::channel(Vec::new());

        let mut pipeline = Pipeline {
            caller: self.caller.clone(),
            account: None,
            tokens: Vec::new(),
            validated: Vec::new(),
            generation: 0,
            read_pending: false,
            result_tx,
            balances_tx,
            loading_tx,
            ordered_tx,
        };

        pipeline.inputs_changed(
            account_rx.borrow_and_update().clone(),
            tokens_rx.borrow_and_update().clone(),
        );

        tokio::spawn(async move {
            // a closed input keeps its last value; the other one still drives the pipeline
            let mut account_open = true;
            let mut tokens_open = true;

            loop {
                if !account_open && !tokens_open && !pipeline.read_pending {
                    debug!("Balance inputs closed, nothing left to read");
                    break;
                }

                select! {
                    changed = account_rx.changed(), if account_open => {
                        if changed.is_err() {
                            debug!("Account input closed");
                            account_open = false;
                            continue;
                        }
                        let account = account_rx.borrow_and_update().clone();
                        let tokens = pipeline.tokens.clone();
                        pipeline.inputs_changed(account, tokens);
                    }
                    changed = tokens_rx.changed(), if tokens_open => {
                        if changed.is_err() {
                            debug!("Token list input closed");
                            tokens_open = false;
                            continue;
                        }
                        let tokens = tokens_rx.borrow_and_update().clone();
                        let account = pipeline.account.clone();
                        pipeline.inputs_changed(account, tokens);
                    }
                    Some((generation, result)) = result_rx.recv() => {
                        pipeline.read_completed(generation, result);
                    }
                    _ = stop_rx.recv() => {
                        info!("Stopping balance service");
                        break;
                    }
                }
            }
        });

        info!("Balance service started");
        Ok(BalanceSubscription {
            balances: balances_rx,
            loading: loading_rx,
            ordered: ordered_rx,
        })
    }

    pub async fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(()).await;
            info!("Balance service stop signal sent");
        }
    }
}

impl Pipeline {
    fn inputs_changed(&mut self, account: Option<String>, tokens: Vec<Option<Token>>) {
        // any read still in flight now belongs to an old generation
        self.generation += 1;
        self.validated = validated_tokens(&tokens);
        self.tokens = tokens;
        self.account = account;

        let account = match &self.account {
            Some(account) if !self.validated.is_empty() => account.clone(),
            _ => {
                self.read_pending = false;
                self.publish(&CallStates::default());
                return;
            }
        };

        debug!(
            "Reading {} balances for {} (generation {})",
            self.validated.len(),
            account,
            self.generation
        );
        self.read_pending = true;
        self.publish(&CallStates::loading());

        let calls = balance_of_calls(&self.validated, &account);
        let caller = self.caller.clone();
        let result_tx = self.result_tx.clone();
        let generation = self.generation;

        tokio::spawn(async move {
            let result = caller.call_contracts(calls).await;
            let _ = result_tx.send((generation, result)).await;
        });
    }

    fn read_completed(&mut self, generation: u64, result: Result<Vec<Option<Vec<String>>>>) {
        if generation != self.generation {
            debug!(
                "Discarding balances of generation {} (current {})",
                generation, self.generation
            );
            return;
        }
        self.read_pending = false;

        match result {
            Ok(data) => {
                if data.len() != self.validated.len() {
                    warn!(
                        "Expected {} balance results, got {}",
                        self.validated.len(),
                        data.len()
                    );
                }
                self.publish(&CallStates::resolved(data));
            }
            Err(e) => {
                error!("Error reading token balances: {}", e);
                self.publish(&CallStates::resolved(Vec::new()));
            }
        }
    }

    fn publish(&self, states: &CallStates) {
        let account = self.account.as_deref();
        let balances = derive_balances(account, &self.validated, states);
        let loading = any_loading(account, &self.validated, states);

        self.ordered_tx
            .send_replace(ordered_balances(&self.tokens, &balances));
        self.loading_tx.send_replace(loading);
        self.balances_tx.send_replace(balances);
    }
}
