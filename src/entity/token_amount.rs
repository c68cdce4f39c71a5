use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entity::Token;

/// A raw on-chain amount of a specific token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAmount {
    pub token: Token,
    pub raw: BigUint,
}

impl TokenAmount {
    pub fn new(token: Token, raw: BigUint) -> Self {
        Self { token, raw }
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Render the amount in whole token units, without trailing zeros
    pub fn to_exact(&self) -> String {
        let decimals = self.token.decimals as usize;
        if decimals == 0 {
            return self.raw.to_string();
        }

        let scale = BigUint::from(10u32).pow(decimals as u32);
        let whole = &self.raw / &scale;
        let fraction = (&self.raw % &scale).to_string();

        let padded = format!("{:0>width$}", fraction, width = decimals);
        let trimmed = padded.trim_end_matches('0');

        if trimmed.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, trimmed)
        }
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_exact(), self.token.display_symbol())
    }
}
