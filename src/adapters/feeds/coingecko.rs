//! CoinGecko Price Feed - Live Spot Prices over HTTP
//!
//! Queries the public `simple/price` endpoint for USD price, 24h volume
//! and 24h change. The HTTP client is created lazily on first use and
//! can be released with `close()`; a later request opens a new one.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::types::parse_simple_price;
use crate::config::PriceFeedConfig;
use crate::domain::price::PriceRecord;
use crate::error::PriceError;
use crate::ports::price_source::PriceSource;

/// Source tag written into every live record.
pub const COINGECKO_SOURCE: &str = "coingecko";

/// Internal asset id → CoinGecko coin id.
const PROVIDER_IDS: [(&str, &str); 3] = [
  ("ETH", "ethereum"),
  ("BTC", "bitcoin"),
  ("USDC", "usd-coin"),
];

/// Live price source backed by the CoinGecko REST API.
pub struct CoinGeckoPriceSource {
  /// API root, e.g. `https://api.coingecko.com/api/v3`.
  base_url: String,
  /// Optional request timeout applied to the lazily built client.
  timeout: Option<Duration>,
  /// Lazily created client. The mutex doubles as the init guard.
  session: Mutex<Option<Client>>,
}

impl CoinGeckoPriceSource {
  /// Create a source from config. No connection is opened yet.
  pub fn new(config: &PriceFeedConfig) -> Self {
    Self {
      base_url: config.base_url.trim_end_matches('/').to_string(),
      timeout: config.timeout_seconds.map(Duration::from_secs),
      session: Mutex::new(None),
    }
  }

  /// Map an internal asset id to the provider's coin id.
  pub fn provider_id(asset_id: &str) -> Option<&'static str> {
    PROVIDER_IDS
      .iter()
      .find(|(symbol, _)| symbol.eq_ignore_ascii_case(asset_id))
      .map(|(_, id)| *id)
  }

  /// Whether a client is currently held.
  pub async fn is_open(&self) -> bool {
    self.session.lock().await.is_some()
  }

  /// Return the shared client, building it on first use.
  async fn session(&self) -> Result<Client, PriceError> {
    let mut guard = self.session.lock().await;
    if let Some(client) = guard.as_ref() {
      return Ok(client.clone());
    }

    let mut builder = Client::builder().pool_max_idle_per_host(2);
    if let Some(timeout) = self.timeout {
      builder = builder.timeout(timeout);
    }
    let client = builder.build()?;

    debug!(base_url = %self.base_url, "Opened price feed HTTP session");
    *guard = Some(client.clone());
    Ok(client)
  }
}

#[async_trait]
impl PriceSource for CoinGeckoPriceSource {
  #[instrument(skip(self), fields(source = COINGECKO_SOURCE))]
  async fn fetch_price(&self, asset_id: &str) -> Result<PriceRecord, PriceError> {
    let provider_id = Self::provider_id(asset_id).ok_or_else(|| PriceError::Lookup {
      asset_id: asset_id.to_string(),
    })?;

    let client = self.session().await?;
    let url = format!("{}/simple/price", self.base_url);

    let response = client
      .get(&url)
      .query(&[
        ("ids", provider_id),
        ("vs_currencies", "usd"),
        ("include_24hr_vol", "true"),
        ("include_24hr_change", "true"),
      ])
      .send()
      .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
      warn!(status = %status, provider_id, "Price provider returned an error");
      return Err(PriceError::Fetch {
        status: status.as_u16(),
        body,
      });
    }

    let record = parse_simple_price(&body, provider_id, COINGECKO_SOURCE)?;
    debug!(provider_id, price = %record.price, "Live price fetched");
    Ok(record)
  }

  fn name(&self) -> &str {
    COINGECKO_SOURCE
  }

  async fn close(&self) {
    if self.session.lock().await.take().is_some() {
      info!("Price feed HTTP session closed");
    }
  }
}
