use crate::entity::Token;
use dotenv::dotenv;
use log::warn;
use std::env;
use std::time::Duration;

const DEFAULT_ALLOWED_SLIPPAGE_BIPS: u32 = 50;
const DEFAULT_TX_REFRESH_INTERVAL_SECS: u64 = 5;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Slippage tolerance used for approvals, in basis points
    pub allowed_slippage_bips: u32,

    /// How often pending transactions are re-polled
    pub tx_refresh_interval: Duration,

    /// Tokens whose balances are tracked by default
    pub default_tokens: Vec<Token>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allowed_slippage_bips: DEFAULT_ALLOWED_SLIPPAGE_BIPS,
            tx_refresh_interval: Duration::from_secs(DEFAULT_TX_REFRESH_INTERVAL_SECS),
            default_tokens: Vec::new(),
        }
    }
}

impl Config {
    /// Build the configuration from environment variables (and `.env`)
    pub fn from_env() -> Self {
        dotenv().ok();

        Self::from_vars(
            env::var("ALLOWED_SLIPPAGE_BIPS").ok(),
            env::var("TX_REFRESH_INTERVAL_SECS").ok(),
            env::var("TOKEN_LIST").ok(),
        )
    }

    fn from_vars(
        slippage: Option<String>,
        refresh_secs: Option<String>,
        token_list: Option<String>,
    ) -> Self {
        let allowed_slippage_bips = slippage
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_ALLOWED_SLIPPAGE_BIPS);

        let tx_refresh_interval = refresh_secs
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TX_REFRESH_INTERVAL_SECS));

        let default_tokens = match token_list {
            Some(json) => serde_json::from_str::<Vec<Token>>(&json).unwrap_or_else(|e| {
                warn!("Ignoring malformed TOKEN_LIST: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        Self {
            allowed_slippage_bips,
            tx_refresh_interval,
            default_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_vars(None, None, None);
        assert_eq!(config.allowed_slippage_bips, 50);
        assert_eq!(config.tx_refresh_interval, Duration::from_secs(5));
        assert!(config.default_tokens.is_empty());
    }

    #[test]
    fn test_values_are_parsed() {
        let config = Config::from_vars(
            Some("100".to_string()),
            Some("12".to_string()),
            Some(r#"[{"address":"0x1","decimals":18,"symbol":"ETH"}]"#.to_string()),
        );
        assert_eq!(config.allowed_slippage_bips, 100);
        assert_eq!(config.tx_refresh_interval, Duration::from_secs(12));
        assert_eq!(config.default_tokens.len(), 1);
        assert_eq!(config.default_tokens[0].symbol.as_deref(), Some("ETH"));
        assert_eq!(config.default_tokens[0].name, None);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = Config::from_vars(
            Some("lots".to_string()),
            Some("0".to_string()),
            Some("not json".to_string()),
        );
        assert_eq!(config.allowed_slippage_bips, 50);
        assert_eq!(config.tx_refresh_interval, Duration::from_secs(5));
        assert!(config.default_tokens.is_empty());
    }
}
