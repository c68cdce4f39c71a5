use crate::entity::{BalanceState, Token, TokenAmount, TokenBalances};
use crate::starknet::{balance_of_calls, is_address, CallStates, ContractCaller, Uint256};
use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

/// Keep only present tokens whose address passes validation
pub fn validated_tokens(tokens: &[Option<Token>]) -> Vec<Token> {
    tokens
        .iter()
        .flatten()
        .filter(|token| is_address(Some(&token.address)).is_some())
        .cloned()
        .collect()
}

/// Derive the balance map from the current state of the batched reads.
///
/// `validated` must be the token list the reads were issued for; result `i`
/// of `states` belongs to token `i`.
pub fn derive_balances(
    account: Option<&str>,
    validated: &[Token],
    states: &CallStates,
) -> TokenBalances {
    let mut balances = TokenBalances::new();

    if account.is_none() || validated.is_empty() {
        return balances;
    }

    for (i, token) in validated.iter().enumerate() {
        if states.loading {
            balances.set_pending(&token.address);
            continue;
        }

        let Some(felts) = states.data.get(i).and_then(|d| d.as_ref()) else {
            continue;
        };

        match Uint256::from_felts(felts) {
            Ok(value) => {
                balances.set_resolved(TokenAmount::new(token.clone(), value.to_biguint()));
            }
            Err(e) => {
                warn!("Dropping balance of {}: {}", token.address, e);
            }
        }
    }

    balances
}

/// Aggregate in-flight flag; false whenever no read would be issued
pub fn any_loading(account: Option<&str>, validated: &[Token], states: &CallStates) -> bool {
    account.is_some() && !validated.is_empty() && states.loading
}

/// Re-project balances onto the order of `tokens`
pub fn ordered_balances(tokens: &[Option<Token>], balances: &TokenBalances) -> Vec<BalanceState> {
    tokens
        .iter()
        .map(|token| match token {
            Some(token) if !token.address.is_empty() => balances.get(&token.address),
            _ => BalanceState::NotRequested,
        })
        .collect()
}

#[async_trait]
pub trait BalanceInteractor: Send + Sync {
    async fn get_token_balances(
        &self,
        account: Option<&str>,
        tokens: &[Option<Token>],
    ) -> Result<TokenBalances>;
}

pub struct BalanceInteractorImpl {
    caller: Arc<dyn ContractCaller>,
}

impl BalanceInteractorImpl {
    pub fn new(caller: Arc<dyn ContractCaller>) -> Self {
        Self { caller }
    }
}

#[async_trait]
impl BalanceInteractor for BalanceInteractorImpl {
    async fn get_token_balances(
        &self,
        account: Option<&str>,
        tokens: &[Option<Token>],
    ) -> Result<TokenBalances> {
        let validated = validated_tokens(tokens);

        let Some(account_address) = account else {
            return Ok(TokenBalances::new());
        };
        if validated.is_empty() {
            return Ok(TokenBalances::new());
        }

        debug!(
            "Reading {} token balances for {}",
            validated.len(),
            account_address
        );

        let calls = balance_of_calls(&validated, account_address);
        let data = self.caller.call_contracts(calls).await?;

        Ok(derive_balances(
            account,
            &validated,
            &CallStates::resolved(data),
        ))
    }
}
