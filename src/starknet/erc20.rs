use crate::entity::Token;
use crate::starknet::call::ContractCall;
use crate::starknet::constants::BALANCE_OF;

/// One `balanceOf(account)` call per token, in token order
pub fn balance_of_calls(tokens: &[Token], account: &str) -> Vec<ContractCall> {
    tokens
        .iter()
        .map(|token| ContractCall {
            contract_address: token.address.clone(),
            method: BALANCE_OF.to_string(),
            calldata: vec![account.to_string()],
        })
        .collect()
}
