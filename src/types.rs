//! Shared types for chainbalance
//!
//! Data structures that cross module boundaries are defined here
//! for consistent serialization.

use serde::{Deserialize, Serialize};

/// Supported blockchain networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Chain {
    Bitcoin,
    Ethereum,
}

impl Chain {
    pub fn symbol(&self) -> &'static str {
        match self {
            Chain::Bitcoin => "BTC",
            Chain::Ethereum => "ETH",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Chain::Bitcoin => "Bitcoin",
            Chain::Ethereum => "Ethereum",
        }
    }

    /// Decimal places between the smallest unit and the display unit
    pub fn decimals(&self) -> u8 {
        match self {
            Chain::Bitcoin => 8,
            Chain::Ethereum => 18,
        }
    }
}

impl std::str::FromStr for Chain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bitcoin" | "btc" => Ok(Chain::Bitcoin),
            "ethereum" | "eth" => Ok(Chain::Ethereum),
            _ => Err(format!("Unknown chain: {}", s)),
        }
    }
}

/// Balance for a single address
///
/// `balance` is the display-unit decimal string; `balance_raw` keeps the
/// smallest-unit integer exactly as the API reported it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    pub chain: Chain,
    pub address: String,
    pub balance: String,
    pub balance_raw: String,
}
