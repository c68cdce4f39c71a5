use crate::entity::{MaximumAmountIn, TokenAmount};
use crate::interactor::swap_approve_interactor::swap_approve_amount;
use anyhow::{anyhow, Result};
use log::{debug, error, info};
use tokio::select;
use tokio::sync::{mpsc, watch};

/// Allowed slippage in basis points, fixed or following a watched value
pub enum SlippageSource {
    Fixed(f64),
    Watched(watch::Receiver<f64>),
}

/// Recomputes the amount to approve whenever the trade or slippage changes
pub struct SwapApproveAmountService {
    stop_tx: Option<mpsc::Sender<()>>,
}

impl SwapApproveAmountService {
    pub fn new() -> Self {
        Self { stop_tx: None }
    }

    pub async fn start<T>(
        &mut self,
        mut trade_rx: watch::Receiver<Option<T>>,
        slippage: SlippageSource,
    ) -> Result<watch::Receiver<Option<TokenAmount>>>
    where
        T: MaximumAmountIn + Send + Sync + 'static,
    {
        if self.stop_tx.is_some() {
            return Err(anyhow!("Swap approve service is already running"));
        }

        let (stop_tx, mut stop_rx) = mpsc::channel::<()>(1);
        self.stop_tx = Some(stop_tx);

        let (mut fixed, mut slippage_rx) = match slippage {
            SlippageSource::Fixed(value) => (value, None),
            SlippageSource::Watched(rx) => {
                let value = *rx.borrow();
                (value, Some(rx))
            }
        };

        let initial = Self::compute(&mut trade_rx, fixed);
        let (amount_tx, amount_rx) = watch::channel(initial);

        tokio::spawn(async move {
            let mut trade_open = true;

            loop {
                if !trade_open && slippage_rx.is_none() {
                    debug!("Swap approve inputs closed");
                    break;
                }

                select! {
                    changed = trade_rx.changed(), if trade_open => {
                        if changed.is_err() {
                            // the last trade stays in effect for slippage updates
                            debug!("Trade input closed");
                            trade_open = false;
                            continue;
                        }
                    }
                    changed = slippage_changed(&mut slippage_rx) => {
                        match changed {
                            Some(value) => fixed = value,
                            None => {
                                debug!("Slippage input closed");
                                slippage_rx = None;
                                continue;
                            }
                        }
                    }
                    _ = stop_rx.recv() => {
                        info!("Stopping swap approve service");
                        break;
                    }
                }

                amount_tx.send_replace(Self::compute(&mut trade_rx, fixed));
            }
        });

        Ok(amount_rx)
    }

    pub async fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(()).await;
        }
    }

    fn compute<T: MaximumAmountIn>(
        trade_rx: &mut watch::Receiver<Option<T>>,
        allowed_slippage: f64,
    ) -> Option<TokenAmount> {
        let trade = trade_rx.borrow_and_update();
        match swap_approve_amount((*trade).as_ref(), allowed_slippage) {
            Ok(amount) => amount,
            Err(e) => {
                error!("Error computing swap approve amount: {}", e);
                None
            }
        }
    }
}

impl Default for SwapApproveAmountService {
    fn default() -> Self {
        Self::new()
    }
}

// Resolves with the new value, `None` once the sender is gone; never resolves for fixed slippage
async fn slippage_changed(rx: &mut Option<watch::Receiver<f64>>) -> Option<f64> {
    match rx {
        Some(rx) => match rx.changed().await {
            Ok(()) => Some(*rx.borrow_and_update()),
            Err(_) => None,
        },
        None => std::future::pending().await,
    }
}
