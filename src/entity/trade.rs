use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::entity::{Percent, TokenAmount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeType {
    ExactInput,
    ExactOutput,
}

/// Anything that can report the worst-case input of a swap
pub trait MaximumAmountIn {
    /// Input amount needed to guarantee execution within `slippage_tolerance`
    fn maximum_amount_in(&self, slippage_tolerance: &Percent) -> Result<TokenAmount>;
}

/// A quoted swap between two tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    pub input_amount: TokenAmount,
    pub output_amount: TokenAmount,
    pub trade_type: TradeType,
}

impl Trade {
    pub fn exact_in(input_amount: TokenAmount, output_amount: TokenAmount) -> Self {
        Self {
            input_amount,
            output_amount,
            trade_type: TradeType::ExactInput,
        }
    }

    pub fn exact_out(input_amount: TokenAmount, output_amount: TokenAmount) -> Self {
        Self {
            input_amount,
            output_amount,
            trade_type: TradeType::ExactOutput,
        }
    }
}

impl MaximumAmountIn for Trade {
    fn maximum_amount_in(&self, slippage_tolerance: &Percent) -> Result<TokenAmount> {
        match self.trade_type {
            // input is fixed, only the output moves
            TradeType::ExactInput => Ok(self.input_amount.clone()),
            TradeType::ExactOutput => Ok(TokenAmount::new(
                self.input_amount.token.clone(),
                slippage_tolerance.add_to(&self.input_amount.raw),
            )),
        }
    }
}
