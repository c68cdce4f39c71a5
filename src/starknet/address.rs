use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::One;
use regex::Regex;

use crate::starknet::constants::ADDRESS_BOUND_BITS;

/// Validate a Starknet contract address
///
/// Returns the normalized form (lowercase, zero-padded to 64 hex digits) when
/// the input is a 0x-prefixed hex felt below 2^251, `None` otherwise.
pub fn is_address(value: Option<&str>) -> Option<String> {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^0[xX][0-9a-fA-F]{1,64}$").unwrap();
    }

    let value = value?.trim();
    if !RE.is_match(value) {
        return None;
    }

    let parsed = BigUint::parse_bytes(value[2..].as_bytes(), 16)?;
    if parsed >= BigUint::one() << ADDRESS_BOUND_BITS {
        return None;
    }

    Some(format!("0x{:0>64}", parsed.to_str_radix(16)))
}
