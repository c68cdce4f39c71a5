use anyhow::Result;
use num_bigint::BigUint;
use num_traits::One;

use crate::entity::HooksError;
use crate::starknet::constants::UINT128_BITS;

/// Cairo `Uint256`: two 128-bit halves, each carried in one felt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uint256 {
    pub low: BigUint,
    pub high: BigUint,
}

impl Uint256 {
    /// Decode the `[low, high]` felt pair returned by a contract call
    pub fn from_felts(felts: &[String]) -> Result<Self> {
        let (low, high) = match felts {
            [low, high, ..] => (parse_felt(low)?, parse_felt(high)?),
            _ => {
                return Err(HooksError::InvalidUint256(format!(
                    "expected 2 felts, got {}",
                    felts.len()
                ))
                .into())
            }
        };

        let bound = BigUint::one() << UINT128_BITS;
        if low >= bound || high >= bound {
            return Err(HooksError::InvalidUint256("half exceeds 128 bits".to_string()).into());
        }

        Ok(Self { low, high })
    }

    pub fn to_biguint(&self) -> BigUint {
        &self.low + (&self.high << UINT128_BITS)
    }
}

/// Parse a felt given as 0x-prefixed hex or as a decimal string
pub fn parse_felt(value: &str) -> Result<BigUint> {
    let value = value.trim();
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => BigUint::parse_bytes(hex.as_bytes(), 16),
        None => BigUint::parse_bytes(value.as_bytes(), 10),
    };

    parsed.ok_or_else(|| HooksError::InvalidUint256(format!("bad felt '{}'", value)).into())
}
