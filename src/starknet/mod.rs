pub mod address;
pub mod call;
pub mod constants;
pub mod erc20;
pub mod uint256;

// Re-export commonly used items
pub use address::is_address;
pub use call::{CallStates, ContractCall, ContractCaller};
pub use constants::{ETH_ADDRESS, ETH_DECIMALS};
pub use erc20::balance_of_calls;
pub use uint256::Uint256;
