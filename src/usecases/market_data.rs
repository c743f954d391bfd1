//! Market Data Use Case - Normalized Spot Prices
//!
//! Wraps a single `PriceSource` chosen at construction: the mock table
//! when `mock_mode` is set, the live provider otherwise. Live failures
//! are returned to the caller and never fall back to mock data.

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::adapters::feeds::{CoinGeckoPriceSource, MockPriceSource};
use crate::config::PriceFeedConfig;
use crate::domain::price::PriceRecord;
use crate::error::PriceError;
use crate::ports::price_source::PriceSource;

/// Price lookups for the portfolio policy layer.
pub struct MarketDataService {
  source: Arc<dyn PriceSource>,
}

impl MarketDataService {
  /// Select the mock table or the live provider.
  pub fn new(mock_mode: bool, config: &PriceFeedConfig) -> Self {
    let source: Arc<dyn PriceSource> = if mock_mode {
      Arc::new(MockPriceSource::new())
    } else {
      Arc::new(CoinGeckoPriceSource::new(config))
    };
    info!(source = source.name(), "Market data service ready");
    Self { source }
  }

  /// Use an explicit price source.
  pub fn with_source(source: Arc<dyn PriceSource>) -> Self {
    Self { source }
  }

  /// Shared handle to the underlying source.
  pub fn source(&self) -> Arc<dyn PriceSource> {
    Arc::clone(&self.source)
  }

  /// Fetch the current price record for `asset_id`.
  ///
  /// # Errors
  /// `PriceError::Lookup` for assets the live provider cannot map,
  /// `PriceError::Fetch` for non-success provider responses, and
  /// transport/decode errors otherwise. The mock source never fails.
  #[instrument(skip(self), fields(source = self.source.name()))]
  pub async fn get_price(&self, asset_id: &str) -> Result<PriceRecord, PriceError> {
    match self.source.fetch_price(asset_id).await {
      Ok(record) => Ok(record),
      Err(e) => {
        error!(asset_id, error = %e, "Error fetching price");
        Err(e)
      }
    }
  }

  /// Release network resources held by the source. Idempotent.
  pub async fn close(&self) {
    self.source.close().await;
  }
}
