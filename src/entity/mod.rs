mod balance;
mod hooks_error;
mod percent;
mod token;
mod token_amount;
mod trade;
mod transaction;

pub use balance::{BalanceState, TokenBalances};
pub use hooks_error::HooksError;
pub use percent::{Percent, BIPS_BASE};
pub use token::Token;
pub use token_amount::TokenAmount;
pub use trade::{MaximumAmountIn, Trade, TradeType};
pub use transaction::{
    Transaction, TransactionKind, TransactionMetadata, TransactionReceived,
    TransactionRefreshData, TransactionStatus, TransactionSubmitted,
};
