use std::error::Error;

use chainbalance::config::Settings;
use chainbalance::types::Chain;
use chainbalance::utils::logging;
use chainbalance::{balances, log_error, log_info};

/// Genesis block coinbase address
const BTC_DEMO_ADDRESS: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";
const ETH_DEMO_ADDRESS: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

fn main() -> Result<(), Box<dyn Error>> {
    if std::env::var("CHAINBALANCE_DEBUG").map(|v| v == "1").unwrap_or(false) {
        logging::enable_debug();
    }

    // A missing credential is the one failure that stops the program
    let settings = Settings::from_env().map_err(|e| {
        log_error!("main", "Configuration error", error = e);
        e
    })?;

    // Strictly sequential: the Ethereum query does not start until the
    // Bitcoin query has fully resolved.
    for (chain, addr) in [
        (Chain::Bitcoin, BTC_DEMO_ADDRESS),
        (Chain::Ethereum, ETH_DEMO_ADDRESS),
    ] {
        log_info!(
            "main",
            "Checking balance",
            chain = chain.symbol(),
            address = addr
        );

        match balances::check_balance(addr, chain, &settings) {
            Ok(balance) => {
                println!("{} balance: {} {}", chain.name(), balance.balance, chain.symbol());
            }
            Err(e) => {
                log_error!(
                    "main",
                    "Balance check failed",
                    chain = chain.symbol(),
                    error = e
                );
            }
        }
    }

    Ok(())
}
