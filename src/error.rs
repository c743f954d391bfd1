//! Price Fetch Errors
//!
//! Failures of a price lookup propagate to the caller as `PriceError`.
//! Trade and balance failures never surface here: they are captured as
//! data by the trading service.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceError {
  /// Asset id has no provider mapping (live mode only).
  #[error("Unknown asset: {asset_id}")]
  Lookup { asset_id: String },

  /// Provider answered with a non-success status.
  #[error("Failed to fetch price ({status}): {body}")]
  Fetch { status: u16, body: String },

  /// Provider answered 200 but the body has no entry for the asset.
  #[error("Provider response has no quote for {provider_id}")]
  MissingQuote { provider_id: String },

  /// Provider payload could not be turned into a price record.
  #[error("Invalid price payload: {0}")]
  Decode(String),

  /// Connection, timeout, or client construction failure.
  #[error("Price request failed: {0}")]
  Transport(#[from] reqwest::Error),
}
