// Known token information
pub const ETH_ADDRESS: &str = "0x049d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7";
pub const ETH_DECIMALS: u8 = 18;

// Contract addresses live in [0, 2^251)
pub const ADDRESS_BOUND_BITS: u64 = 251;

// Each uint256 half is a u128 stored in one felt
pub const UINT128_BITS: u64 = 128;

// ERC20 entry points
pub const BALANCE_OF: &str = "balanceOf";
