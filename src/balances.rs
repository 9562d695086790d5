//! Balance Fetcher
//!
//! Fetches balances from public explorer APIs: blockchain.info for Bitcoin,
//! Etherscan for Ethereum. Each query is a single GET with no retry, no
//! backoff, and no caching; every failure is absorbed into a `BalanceError`
//! at this boundary.

use std::collections::HashMap;

use crate::address;
use crate::config::Settings;
use crate::error::{BalanceError, BalanceResult};
use crate::types::{Balance, Chain};
use crate::utils::http;
use crate::utils::units::{format_sats, format_wei};

// =============================================================================
// Public API
// =============================================================================

/// Validate an address and fetch its balance.
///
/// Validation runs first and short-circuits: a malformed address never
/// causes a network request.
pub fn check_balance(addr: &str, chain: Chain, settings: &Settings) -> BalanceResult<Balance> {
    let checked = address::require_valid(addr, chain)?;
    for warning in &checked.warnings {
        crate::log_warn!(
            "address",
            "Address accepted with warning",
            chain = chain.symbol(),
            address = checked.normalized,
            warning = warning
        );
    }

    match chain {
        Chain::Bitcoin => fetch_bitcoin_balance(&checked.normalized, settings),
        Chain::Ethereum => fetch_ethereum_balance(&checked.normalized, settings),
    }
}

// =============================================================================
// Bitcoin Balance
// =============================================================================

/// Per-address summary in the blockchain.info balance response
#[derive(Debug, serde::Deserialize)]
struct BtcAddressSummary {
    final_balance: u64,
}

/// Fetch Bitcoin balance from the blockchain.info balance endpoint
pub fn fetch_bitcoin_balance(addr: &str, settings: &Settings) -> BalanceResult<Balance> {
    let url = format!(
        "{}/balance?active={}",
        settings.btc_api_base,
        urlencoding::encode(addr)
    );

    crate::log_debug!("balances", "Requesting BTC balance", address = addr);
    let response = http::get(&url)?;

    let status = response.status();
    if !status.is_success() {
        return Err(BalanceError::http_status(format!(
            "BTC balance endpoint returned HTTP {}",
            status.as_u16()
        )));
    }

    let body: HashMap<String, BtcAddressSummary> = response
        .json()
        .map_err(|e| BalanceError::parse_error(format!("Failed to parse BTC balance: {}", e)))?;

    let sats = extract_final_balance(addr, &body)?;

    Ok(Balance {
        chain: Chain::Bitcoin,
        address: addr.to_string(),
        balance: format_sats(sats),
        balance_raw: sats.to_string(),
    })
}

/// The response is an object keyed by the queried address.
fn extract_final_balance(
    addr: &str,
    body: &HashMap<String, BtcAddressSummary>,
) -> BalanceResult<u64> {
    body.get(addr)
        .map(|summary| summary.final_balance)
        .ok_or_else(|| {
            BalanceError::parse_error("BTC balance response missing entry for queried address")
        })
}

// =============================================================================
// Ethereum Balance
// =============================================================================

/// Etherscan envelope: "status" is "1" on success; on failure "message"
/// explains and "result" may carry extra detail.
#[derive(Debug, serde::Deserialize)]
struct EtherscanResponse {
    status: String,
    message: Option<String>,
    result: Option<String>,
}

/// Fetch Ethereum balance from the Etherscan account/balance endpoint
pub fn fetch_ethereum_balance(addr: &str, settings: &Settings) -> BalanceResult<Balance> {
    let url = format!(
        "{}/api?module=account&action=balance&address={}&tag=latest&apikey={}",
        settings.eth_api_base,
        urlencoding::encode(addr),
        urlencoding::encode(&settings.etherscan_api_key)
    );

    crate::log_debug!("balances", "Requesting ETH balance", address = addr);
    let response = http::get(&url)?;

    let status = response.status();
    if !status.is_success() {
        return Err(BalanceError::http_status(format!(
            "ETH balance endpoint returned HTTP {}",
            status.as_u16()
        )));
    }

    let parsed: EtherscanResponse = response
        .json()
        .map_err(|e| BalanceError::parse_error(format!("Failed to parse ETH balance: {}", e)))?;

    ethereum_balance_from_response(addr, parsed)
}

fn ethereum_balance_from_response(
    addr: &str,
    parsed: EtherscanResponse,
) -> BalanceResult<Balance> {
    if parsed.status != "1" {
        let message = parsed
            .message
            .unwrap_or_else(|| "unknown error".to_string());
        let mut err = BalanceError::upstream(format!("Etherscan API error: {}", message));
        if let Some(detail) = parsed.result {
            err = err.with_details(detail);
        }
        return Err(err);
    }

    let wei = parsed
        .result
        .ok_or_else(|| BalanceError::parse_error("Etherscan response missing result field"))?;
    let balance = format_wei(&wei)?;

    Ok(Balance {
        chain: Chain::Ethereum,
        address: addr.to_string(),
        balance,
        balance_raw: wei,
    })
}
