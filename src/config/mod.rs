//! Configuration Module - TOML-based Gateway Configuration
//!
//! Loads and validates configuration from `config.toml`.
//! Endpoints, modes and portfolio targets are externalized here;
//! nothing is hardcoded in the usecases layer.

pub mod loader;

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Top-level gateway configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before any service is built.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Gateway identity and runtime switches.
  pub gateway: GatewayConfig,
  /// Live price provider settings.
  #[serde(default)]
  pub price_feed: PriceFeedConfig,
  /// Trade execution settings.
  #[serde(default)]
  pub trading: TradingConfig,
  /// Portfolio targets consumed by the upstream policy layer.
  pub portfolio: PortfolioConfig,
  /// Seed state for the in-memory paper wallet.
  #[serde(default)]
  pub paper_wallet: PaperWalletConfig,
}

/// Gateway identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
  /// Human-readable gateway name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Verbose logging; forces the `debug` level. On unless disabled.
  #[serde(default = "default_true")]
  pub debug: bool,
  /// Serve prices from the in-memory table instead of the live provider.
  #[serde(default = "default_true")]
  pub mock_prices: bool,
  /// Chain the custodial wallet operates on.
  #[serde(default = "default_network_id")]
  pub network_id: String,
}

impl GatewayConfig {
  /// Level handed to the tracing filter.
  pub fn effective_log_level(&self) -> &str {
    if self.debug { "debug" } else { self.log_level.as_str() }
  }
}

/// Live price provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceFeedConfig {
  /// API root of the provider.
  #[serde(default = "default_price_feed_url")]
  pub base_url: String,
  /// HTTP request timeout in seconds. No deadline when unset.
  pub timeout_seconds: Option<u64>,
}

impl Default for PriceFeedConfig {
  fn default() -> Self {
    Self {
      base_url: default_price_feed_url(),
      timeout_seconds: None,
    }
  }
}

/// Trade execution configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TradingConfig {
  /// Upper bound on submit + resolve, in seconds. No deadline when unset.
  pub trade_timeout_seconds: Option<u64>,
}

/// Portfolio targets. Validated here, acted on by the policy layer.
#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioConfig {
  /// Assets the portfolio holds.
  pub target_assets: Vec<String>,
  /// Target weight per asset, each in [0, 1].
  #[serde(default)]
  pub target_allocation: HashMap<String, f64>,
  /// Drift that triggers a rebalance.
  #[serde(default = "default_rebalancing_threshold")]
  pub rebalancing_threshold: f64,
  /// Largest single trade in quote units.
  #[serde(default = "default_max_single_trade_size")]
  pub max_single_trade_size: Decimal,
  /// Whether the policy layer rebalances on its own.
  #[serde(default = "default_true")]
  pub auto_rebalancing: bool,
  /// Optional risk limits.
  pub risk_limits: Option<RiskLimits>,
}

/// Risk management limits.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskLimits {
  #[serde(default = "default_max_position_size")]
  pub max_position_size: f64,
  #[serde(default = "default_max_portfolio_var")]
  pub max_portfolio_var: f64,
  #[serde(default = "default_max_concentration")]
  pub max_concentration: f64,
  #[serde(default = "default_min_liquidity_score")]
  pub min_liquidity_score: f64,
}

/// Paper wallet seed configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PaperWalletConfig {
  /// Explorer prefix for generated transaction links.
  #[serde(default = "default_explorer_url")]
  pub explorer_url: String,
  /// Starting balances by asset id.
  #[serde(default)]
  pub balances: HashMap<String, Decimal>,
}

impl Default for PaperWalletConfig {
  fn default() -> Self {
    Self {
      explorer_url: default_explorer_url(),
      balances: HashMap::new(),
    }
  }
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

const fn default_true() -> bool {
  true
}

fn default_network_id() -> String {
  "base-sepolia".to_string()
}

fn default_price_feed_url() -> String {
  "https://api.coingecko.com/api/v3".to_string()
}

const fn default_rebalancing_threshold() -> f64 {
  0.02
}

fn default_max_single_trade_size() -> Decimal {
  dec!(10000)
}

const fn default_max_position_size() -> f64 {
  0.4
}

const fn default_max_portfolio_var() -> f64 {
  0.15
}

const fn default_max_concentration() -> f64 {
  0.5
}

const fn default_min_liquidity_score() -> f64 {
  0.7
}

fn default_explorer_url() -> String {
  "https://sepolia.basescan.org/tx".to_string()
}
