use std::collections::HashMap;

use crate::entity::TokenAmount;

/// Eventually-consistent balance of one token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceState {
    /// A read for this token is in flight
    Pending,
    /// The read completed with a value (zero included)
    Resolved(TokenAmount),
    /// No read was issued, or it returned no data
    NotRequested,
}

impl BalanceState {
    pub fn is_pending(&self) -> bool {
        matches!(self, BalanceState::Pending)
    }

    pub fn amount(&self) -> Option<&TokenAmount> {
        match self {
            BalanceState::Resolved(amount) => Some(amount),
            _ => None,
        }
    }
}

/// Balances keyed by token address
///
/// Entries are only ever `Pending` or `Resolved`; looking up an address that
/// has no entry yields `NotRequested`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenBalances {
    entries: HashMap<String, BalanceState>,
}

impl TokenBalances {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_pending(&mut self, token_address: &str) {
        self.entries
            .insert(token_address.to_string(), BalanceState::Pending);
    }

    pub(crate) fn set_resolved(&mut self, amount: TokenAmount) {
        self.entries
            .insert(amount.token.address.clone(), BalanceState::Resolved(amount));
    }

    pub fn get(&self, token_address: &str) -> BalanceState {
        self.entries
            .get(token_address)
            .cloned()
            .unwrap_or(BalanceState::NotRequested)
    }

    pub fn contains(&self, token_address: &str) -> bool {
        self.entries.contains_key(token_address)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BalanceState)> {
        self.entries.iter()
    }
}
