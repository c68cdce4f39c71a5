use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub address: String,        // Contract address (0x-prefixed felt)
    pub decimals: u8,           // Number of decimal places
    #[serde(default)]
    pub symbol: Option<String>, // Token symbol (e.g. "ETH", "USDC")
    #[serde(default)]
    pub name: Option<String>,   // Full token name
}

impl Token {
    pub fn new(address: impl Into<String>, decimals: u8) -> Self {
        Self {
            address: address.into(),
            decimals,
            symbol: None,
            name: None,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    // Symbol for display, falls back to the address
    pub fn display_symbol(&self) -> &str {
        self.symbol.as_deref().unwrap_or(&self.address)
    }
}
