//! CoinGecko Response Types
//!
//! Serialization types for the `simple/price` endpoint. Numbers are kept
//! as `serde_json::Number`, which with `arbitrary_precision` enabled holds
//! the literal text from the wire, so decimals are built from that text
//! and never pass through `f64`.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Number;

use crate::domain::price::PriceRecord;
use crate::error::PriceError;

/// Body of `GET /simple/price`, keyed by provider asset id.
pub type SimplePriceResponse = HashMap<String, SimplePriceQuote>;

/// Quote for one provider asset id.
#[derive(Debug, Clone, Deserialize)]
pub struct SimplePriceQuote {
  /// Spot price in USD.
  pub usd: Option<Number>,
  /// 24h volume in USD.
  #[serde(default)]
  pub usd_24h_vol: Option<Number>,
  /// 24h change as reported by the provider.
  #[serde(default)]
  pub usd_24h_change: Option<Number>,
}

impl SimplePriceQuote {
  /// Convert into a price record tagged with `source`.
  ///
  /// # Errors
  /// `PriceError::Decode` when `usd` is missing, unparseable, or not
  /// strictly positive, or when a present volume/change is unparseable.
  pub fn into_record(self, source: &str) -> Result<PriceRecord, PriceError> {
    let price = self
      .usd
      .as_ref()
      .ok_or_else(|| PriceError::Decode("missing usd price".to_string()))
      .and_then(exact_decimal)?;

    if price <= Decimal::ZERO {
      return Err(PriceError::Decode(format!("non-positive price {price}")));
    }

    let volume_24h = self.usd_24h_vol.as_ref().map(exact_decimal).transpose()?;

    let change_24h = self
      .usd_24h_change
      .as_ref()
      .map(|n| {
        n.as_f64()
          .ok_or_else(|| PriceError::Decode(format!("invalid 24h change {n}")))
      })
      .transpose()?;

    Ok(PriceRecord::now(price, volume_24h, change_24h, source))
  }
}

/// Parse a JSON number into a `Decimal` from its literal text.
///
/// Falls back to scientific notation (`1.5e-7`) which the provider uses
/// for very small values.
pub fn exact_decimal(number: &Number) -> Result<Decimal, PriceError> {
  let text = number.to_string();
  Decimal::from_str_exact(&text)
    .or_else(|_| Decimal::from_scientific(&text))
    .or_else(|_| Decimal::from_str(&text))
    .map_err(|e| PriceError::Decode(format!("invalid decimal {text}: {e}")))
}

/// Decode a raw response body and extract the quote for `provider_id`.
///
/// # Errors
/// `PriceError::Decode` for malformed JSON, `PriceError::MissingQuote`
/// when the body has no entry for `provider_id`.
pub fn parse_simple_price(
  body: &str,
  provider_id: &str,
  source: &str,
) -> Result<PriceRecord, PriceError> {
  let mut response: SimplePriceResponse =
    serde_json::from_str(body).map_err(|e| PriceError::Decode(e.to_string()))?;

  let quote = response
    .remove(provider_id)
    .ok_or_else(|| PriceError::MissingQuote {
      provider_id: provider_id.to_string(),
    })?;

  quote.into_record(source)
}
