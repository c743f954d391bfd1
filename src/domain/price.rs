//! Price records produced by every price source.
//!
//! A `PriceRecord` is a plain value: built fresh on each fetch, never
//! mutated, never cached here. Monetary fields are exact decimals.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Source tag used by the deterministic in-memory table.
pub const MOCK_SOURCE: &str = "mock";

/// Normalized price snapshot for a single asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Spot price in USD. Zero only for the mock "unknown asset" record.
    pub price: Decimal,
    /// Capture instant.
    pub timestamp: DateTime<Utc>,
    /// Traded volume over the last 24h, in USD.
    pub volume_24h: Option<Decimal>,
    /// Price change over the last 24h in percent points (`5.2` is +5.2%),
    /// passed through unscaled from the source.
    pub change_24h: Option<f64>,
    /// `"mock"` or the live provider identifier.
    pub source: String,
}

impl PriceRecord {
    /// Build a record stamped with the current time.
    pub fn now(
        price: Decimal,
        volume_24h: Option<Decimal>,
        change_24h: Option<f64>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            price,
            timestamp: Utc::now(),
            volume_24h,
            change_24h,
            source: source.into(),
        }
    }

    /// Whether this is the zero-priced placeholder for an unknown asset.
    pub fn is_placeholder(&self) -> bool {
        self.price.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_record_serializes_decimals_as_text() {
        let record = PriceRecord::now(
            dec!(40123.456789),
            Some(dec!(1234567.89)),
            Some(-1.25),
            "coingecko",
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["price"], "40123.456789");
        assert_eq!(json["volume_24h"], "1234567.89");
        assert_eq!(json["source"], "coingecko");
    }

    #[test]
    fn test_placeholder_detection() {
        let zero = PriceRecord::now(Decimal::ZERO, Some(Decimal::ZERO), Some(0.0), MOCK_SOURCE);
        assert!(zero.is_placeholder());

        let real = PriceRecord::now(dec!(1), None, None, MOCK_SOURCE);
        assert!(!real.is_placeholder());
    }
}
