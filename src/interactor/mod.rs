pub mod balance_interactor;
pub mod swap_approve_interactor;

pub use balance_interactor::{
    any_loading, derive_balances, ordered_balances, validated_tokens, BalanceInteractor,
    BalanceInteractorImpl,
};
pub use swap_approve_interactor::{slippage_percent, swap_approve_amount};
