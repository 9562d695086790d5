//! chainbalance
//!
//! Reports the balance of a Bitcoin or Ethereum address by querying public
//! explorer APIs.
//!
//! # Architecture
//!
//! - **address**: structural address validation (no I/O)
//! - **balances**: one GET per query against the chain's balance API,
//!   JSON parsing, and smallest-unit to display-unit conversion
//! - **config**: environment-driven settings, checked at startup
//! - **error**: the failure taxonomy every operation returns
//! - **utils**: shared HTTP client, logging, unit formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use chainbalance::{check_balance, Chain, Settings};
//!
//! let settings = Settings::from_env()?;
//! let balance = check_balance("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", Chain::Bitcoin, &settings)?;
//! println!("{} BTC", balance.balance);
//! ```

pub mod address;
pub mod balances;
pub mod config;
pub mod error;
pub mod types;
pub mod utils;

// Re-export key types for convenience
pub use balances::check_balance;
pub use config::Settings;
pub use error::{BalanceError, BalanceResult, ErrorCode};
pub use types::{Balance, Chain};
