//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::info;

use super::AppConfig;
use crate::domain::assets::supported_asset;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "GATEWAY_CONFIG";

/// Config file used when `GATEWAY_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Resolve the config file path from the environment.
pub fn config_path() -> String {
  std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)
    .with_context(|| format!("Invalid config file: {}", path.display()))?;

  info!(
    target_assets = config.portfolio.target_assets.len(),
    mock_prices = config.gateway.mock_prices,
    network = %config.gateway.network_id,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig = toml::from_str(content).context("Failed to parse TOML")?;
  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Non-empty identity and endpoint strings
/// - Positive timeouts when set
/// - Target assets present in the supported-asset table
/// - Fractions in [0, 1] and positive trade sizes
/// - Non-negative paper balances
fn validate_config(config: &AppConfig) -> Result<()> {
  // Gateway validation
  anyhow::ensure!(
    !config.gateway.name.is_empty(),
    "Gateway name must not be empty"
  );
  anyhow::ensure!(
    !config.gateway.network_id.is_empty(),
    "network_id must not be empty"
  );

  // Endpoint validation
  anyhow::ensure!(
    !config.price_feed.base_url.is_empty(),
    "Price feed base_url must not be empty"
  );
  anyhow::ensure!(
    config.price_feed.timeout_seconds != Some(0),
    "price_feed.timeout_seconds must be positive"
  );
  anyhow::ensure!(
    config.trading.trade_timeout_seconds != Some(0),
    "trading.trade_timeout_seconds must be positive"
  );

  // Portfolio validation
  let portfolio = &config.portfolio;
  anyhow::ensure!(
    !portfolio.target_assets.is_empty(),
    "At least one target asset must be configured"
  );

  for asset in &portfolio.target_assets {
    anyhow::ensure!(
      supported_asset(asset).is_some(),
      "Target asset {asset} is not supported"
    );
  }

  for (asset, weight) in &portfolio.target_allocation {
    anyhow::ensure!(
      portfolio
        .target_assets
        .iter()
        .any(|a| a.eq_ignore_ascii_case(asset)),
      "Allocation for {asset} which is not a target asset"
    );
    anyhow::ensure!(
      (0.0..=1.0).contains(weight),
      "Allocation for {asset} must be in [0, 1], got {weight}"
    );
  }

  anyhow::ensure!(
    (0.0..=1.0).contains(&portfolio.rebalancing_threshold),
    "rebalancing_threshold must be in [0, 1], got {}",
    portfolio.rebalancing_threshold
  );
  anyhow::ensure!(
    portfolio.max_single_trade_size > Decimal::ZERO,
    "max_single_trade_size must be positive, got {}",
    portfolio.max_single_trade_size
  );

  // Risk limit validation
  if let Some(limits) = &portfolio.risk_limits {
    anyhow::ensure!(
      (0.0..=1.0).contains(&limits.max_position_size),
      "max_position_size must be in [0, 1], got {}",
      limits.max_position_size
    );
    anyhow::ensure!(
      limits.max_portfolio_var >= 0.0,
      "max_portfolio_var must be non-negative, got {}",
      limits.max_portfolio_var
    );
    anyhow::ensure!(
      (0.0..=1.0).contains(&limits.max_concentration),
      "max_concentration must be in [0, 1], got {}",
      limits.max_concentration
    );
    anyhow::ensure!(
      (0.0..=1.0).contains(&limits.min_liquidity_score),
      "min_liquidity_score must be in [0, 1], got {}",
      limits.min_liquidity_score
    );
  }

  // Paper wallet validation
  for (asset, balance) in &config.paper_wallet.balances {
    anyhow::ensure!(
      *balance >= Decimal::ZERO,
      "Paper balance for {asset} must be non-negative, got {balance}"
    );
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  const SAMPLE: &str = r#"
[gateway]
name = "test-gateway"
mock_prices = true

[price_feed]
timeout_seconds = 5

[portfolio]
target_assets = ["ETH", "USDC"]
target_allocation = { ETH = 0.6, USDC = 0.4 }
max_single_trade_size = "2500.50"

[portfolio.risk_limits]
max_concentration = 0.6

[paper_wallet]
balances = { USDC = "10000", eth = "1.25" }
"#;

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_parse_sample_with_defaults() {
    let config = parse_config(SAMPLE).unwrap();
    assert_eq!(config.gateway.log_level, "info");
    assert_eq!(config.gateway.network_id, "base-sepolia");
    assert_eq!(config.price_feed.base_url, "https://api.coingecko.com/api/v3");
    assert_eq!(config.price_feed.timeout_seconds, Some(5));
    assert!(config.trading.trade_timeout_seconds.is_none());
    assert_eq!(config.portfolio.max_single_trade_size, dec!(2500.50));
    assert!((config.portfolio.rebalancing_threshold - 0.02).abs() < f64::EPSILON);

    let limits = config.portfolio.risk_limits.unwrap();
    assert!((limits.max_concentration - 0.6).abs() < f64::EPSILON);
    assert!((limits.max_position_size - 0.4).abs() < f64::EPSILON);

    assert_eq!(config.paper_wallet.balances["eth"], dec!(1.25));
  }

  #[test]
  fn test_debug_defaults_on() {
    let config = parse_config(SAMPLE).unwrap();
    assert!(config.gateway.debug);
    assert_eq!(config.gateway.effective_log_level(), "debug");

    let quiet = parse_config(&SAMPLE.replace(
      "mock_prices = true",
      "mock_prices = true\ndebug = false",
    ))
    .unwrap();
    assert_eq!(quiet.gateway.effective_log_level(), "info");
  }

  #[test]
  fn test_debug_forces_debug_level() {
    let config = parse_config(&SAMPLE.replace(
      "mock_prices = true",
      "mock_prices = true\ndebug = true\nlog_level = \"warn\"",
    ))
    .unwrap();
    assert_eq!(config.gateway.effective_log_level(), "debug");
  }

  #[test]
  fn test_rejects_unsupported_target_asset() {
    let err = parse_config(&SAMPLE.replace(r#"["ETH", "USDC"]"#, r#"["ETH", "DOGE"]"#))
      .unwrap_err();
    assert!(format!("{err:#}").contains("DOGE"));
  }

  #[test]
  fn test_rejects_allocation_out_of_range() {
    let err = parse_config(&SAMPLE.replace("ETH = 0.6", "ETH = 1.6")).unwrap_err();
    assert!(format!("{err:#}").contains("Allocation for ETH"));
  }

  #[test]
  fn test_rejects_allocation_for_unknown_target() {
    let err = parse_config(&SAMPLE.replace("USDC = 0.4", "BTC = 0.4")).unwrap_err();
    assert!(format!("{err:#}").contains("not a target asset"));
  }

  #[test]
  fn test_rejects_zero_timeout() {
    let err = parse_config(&SAMPLE.replace("timeout_seconds = 5", "timeout_seconds = 0"))
      .unwrap_err();
    assert!(format!("{err:#}").contains("timeout_seconds"));
  }

  #[test]
  fn test_rejects_bad_risk_limit() {
    let err = parse_config(&SAMPLE.replace("max_concentration = 0.6", "max_concentration = 2.0"))
      .unwrap_err();
    assert!(format!("{err:#}").contains("max_concentration"));
  }

  #[test]
  fn test_rejects_negative_paper_balance() {
    let err = parse_config(&SAMPLE.replace(r#"eth = "1.25""#, r#"eth = "-1""#)).unwrap_err();
    assert!(format!("{err:#}").contains("non-negative"));
  }

  #[test]
  fn test_rejects_non_positive_trade_size() {
    let err = parse_config(&SAMPLE.replace(r#""2500.50""#, r#""0""#)).unwrap_err();
    assert!(format!("{err:#}").contains("max_single_trade_size"));
  }
}
