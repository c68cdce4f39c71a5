use crate::entity::{HooksError, MaximumAmountIn, Percent, TokenAmount};
use anyhow::Result;

/// Convert an allowed slippage in basis points into a `Percent`.
///
/// Fractional bips are floored.
pub fn slippage_percent(allowed_slippage: f64) -> Result<Percent> {
    if !allowed_slippage.is_finite() {
        return Err(HooksError::InvalidSlippage(allowed_slippage.to_string()).into());
    }

    let bips = allowed_slippage.floor();
    if bips < 0.0 {
        return Err(HooksError::InvalidSlippage(allowed_slippage.to_string()).into());
    }

    Ok(Percent::from_bips(bips as u64))
}

/// Amount the user has to approve so that `trade` executes within
/// `allowed_slippage` basis points. `None` when there is no trade.
pub fn swap_approve_amount<T: MaximumAmountIn + ?Sized>(
    trade: Option<&T>,
    allowed_slippage: f64,
) -> Result<Option<TokenAmount>> {
    let Some(trade) = trade else {
        return Ok(None);
    };

    let percent = slippage_percent(allowed_slippage)?;
    trade.maximum_amount_in(&percent).map(Some)
}
