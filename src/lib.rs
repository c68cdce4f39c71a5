//! Reactive data bindings for a Starknet DEX front-end: token balances of the
//! connected account, the amount to approve for a swap, and tracking of
//! submitted transactions.
pub mod config;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod services;
pub mod starknet;
pub mod utils;

// Re-export commonly used items
pub use config::Config;
pub use di::*;
pub use entity::*;
pub use interactor::*;
pub use services::*;
pub use starknet::*;
pub use utils::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
