//! Unit conversion
//!
//! Exact integer formatting between each chain's smallest unit and its
//! display unit. Floating point is avoided so reported balances are
//! bit-for-bit stable.

use crate::error::{BalanceError, BalanceResult};

/// Satoshi per BTC
pub const SATS_PER_BTC: u64 = 100_000_000;

/// Wei per ETH
pub const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

/// Format a satoshi amount as a BTC decimal string with 8 fractional digits.
pub fn format_sats(sats: u64) -> String {
    format!("{}.{:08}", sats / SATS_PER_BTC, sats % SATS_PER_BTC)
}

/// Format a wei amount (decimal string, as returned by Etherscan) as an ETH
/// decimal string. Trailing zeros are trimmed but at least one fractional
/// digit is kept, so one whole ETH renders as "1.0".
pub fn format_wei(wei: &str) -> BalanceResult<String> {
    let value: u128 = wei
        .trim()
        .parse()
        .map_err(|_| BalanceError::parse_error(format!("Invalid wei amount '{}'", wei)))?;

    let whole = value / WEI_PER_ETH;
    let frac = value % WEI_PER_ETH;

    let mut frac_str = format!("{:018}", frac);
    while frac_str.len() > 1 && frac_str.ends_with('0') {
        frac_str.pop();
    }

    Ok(format!("{}.{}", whole, frac_str))
}
