use anyhow::Result;
use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt;

use crate::entity::HooksError;

/// Basis points per whole (1 bip = 0.01%)
pub const BIPS_BASE: u32 = 10_000;

/// A non-negative fraction used as a slippage tolerance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Percent {
    pub numerator: BigUint,
    pub denominator: BigUint,
}

impl Percent {
    pub fn new(numerator: BigUint, denominator: BigUint) -> Result<Self> {
        if denominator.is_zero() {
            return Err(HooksError::InvalidSlippage("zero denominator".to_string()).into());
        }

        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn from_bips(bips: u64) -> Self {
        Self {
            numerator: BigUint::from(bips),
            denominator: BigUint::from(BIPS_BASE),
        }
    }

    /// Apply `raw * (1 + self)`, rounding down
    pub fn add_to(&self, raw: &BigUint) -> BigUint {
        raw * (&self.denominator + &self.numerator) / &self.denominator
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // hundredths of a percent, rounded down
        let hundredths = &self.numerator * BigUint::from(BIPS_BASE) / &self.denominator;
        let whole = &hundredths / BigUint::from(100u32);
        let fraction = format!("{:0>2}", (&hundredths % BigUint::from(100u32)).to_string());
        let fraction = fraction.trim_end_matches('0');

        if fraction.is_empty() {
            write!(f, "{}%", whole)
        } else {
            write!(f, "{}.{}%", whole, fraction)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_fractional_percent() {
        assert_eq!(Percent::from_bips(50).to_string(), "0.5%");
        assert_eq!(Percent::from_bips(125).to_string(), "1.25%");
        assert_eq!(Percent::from_bips(300).to_string(), "3%");
    }

    #[test]
    fn test_add_to_rounds_down() {
        // 0.5% on 999 = 1003.995 -> 1003
        let percent = Percent::from_bips(50);
        assert_eq!(percent.add_to(&BigUint::from(999u64)), BigUint::from(1003u64));
    }

    #[test]
    fn test_zero_denominator_rejected() {
        let result = Percent::new(BigUint::from(1u32), BigUint::zero());
        assert!(result.is_err());
    }
}
