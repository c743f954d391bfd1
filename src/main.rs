//! Agent Trade Gateway - Entry Point
//!
//! Wires configuration, logging, the market data service and the
//! trading service, then prints one status snapshot (prices and
//! balances for every target asset) and exits.
//!
//! Wiring sequence:
//! 1. Load config.toml (or $GATEWAY_CONFIG) + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Create MarketDataService (mock table or CoinGecko)
//! 4. Create PaperWallet + TradingService
//! 5. Fetch prices and balances for the target assets
//! 6. Print the snapshot as JSON, close the price feed

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use agent_trade_gateway::adapters::wallet::PaperWallet;
use agent_trade_gateway::config::{self, AppConfig};
use agent_trade_gateway::domain::PriceRecord;
use agent_trade_gateway::usecases::{MarketDataService, TradingService};

/// Point-in-time view of the portfolio's target assets.
#[derive(Debug, Serialize)]
struct StatusSnapshot {
    network_id: String,
    price_source: String,
    prices: BTreeMap<String, PriceRecord>,
    balances: BTreeMap<String, Decimal>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let config = config::loader::load_config(&config::loader::config_path())
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(config.gateway.effective_log_level())
            }),
        )
        .json()
        .init();

    info!(
        name = %config.gateway.name,
        version = env!("CARGO_PKG_VERSION"),
        network = %config.gateway.network_id,
        mock_prices = config.gateway.mock_prices,
        targets = ?config.portfolio.target_assets,
        "Starting agent trade gateway"
    );

    // ── 3. Market data ──────────────────────────────────────
    let market = MarketDataService::new(config.gateway.mock_prices, &config.price_feed);

    // ── 4. Paper custody + trading ──────────────────────────
    let wallet = Arc::new(PaperWallet::new(market.source(), &config.paper_wallet));
    let mut trading = TradingService::new(wallet);
    if let Some(secs) = config.trading.trade_timeout_seconds {
        trading = trading.with_trade_timeout(Duration::from_secs(secs));
    }
    info!("Trading against in-memory paper wallet");

    // ── 5. Snapshot ─────────────────────────────────────────
    let snapshot = collect_snapshot(&config, &market, &trading).await;

    // ── 6. Report + release ─────────────────────────────────
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).context("Failed to encode snapshot")?
    );

    market.close().await;
    info!("Shutdown complete");
    Ok(())
}

/// Fetch prices and balances for every target asset.
///
/// Price failures are skipped (already logged by the service);
/// balances always cover every target.
async fn collect_snapshot(
    config: &AppConfig,
    market: &MarketDataService,
    trading: &TradingService<PaperWallet>,
) -> StatusSnapshot {
    let targets = &config.portfolio.target_assets;

    let mut prices = BTreeMap::new();
    for asset in targets {
        match market.get_price(asset).await {
            Ok(record) => {
                info!(asset = %asset, price = %record.price, source = %record.source, "Price");
                prices.insert(asset.clone(), record);
            }
            Err(e) => warn!(asset = %asset, error = %e, "Price unavailable, omitted from snapshot"),
        }
    }

    let balances = trading.check_balances(targets).await.into_iter().collect();

    StatusSnapshot {
        network_id: config.gateway.network_id.clone(),
        price_source: market.source().name().to_string(),
        prices,
        balances,
    }
}
