//! Mock Price Feed - Deterministic In-Memory Table
//!
//! Serves fixed quotes for ETH, BTC and USDC during development and
//! tests. Unknown assets yield a zero-priced record instead of an
//! error so callers iterating a portfolio are never interrupted.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::domain::price::{PriceRecord, MOCK_SOURCE};
use crate::error::PriceError;
use crate::ports::price_source::PriceSource;

/// One row of the mock table: (symbol, price, 24h volume, 24h change).
type MockQuote = (&'static str, Decimal, Decimal, f64);

const MOCK_QUOTES: [MockQuote; 3] = [
    ("ETH", dec!(2000), dec!(1000000000), 5.2),
    ("BTC", dec!(40000), dec!(5000000000), 3.1),
    ("USDC", dec!(1), dec!(10000000000), 0.0),
];

/// Price source backed by a fixed table.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockPriceSource;

impl MockPriceSource {
    pub const fn new() -> Self {
        Self
    }

    /// Build the record for `asset_id` (case-insensitive).
    pub fn quote(asset_id: &str) -> PriceRecord {
        let (price, volume, change) = MOCK_QUOTES
            .iter()
            .find(|(symbol, ..)| symbol.eq_ignore_ascii_case(asset_id))
            .map_or((Decimal::ZERO, Decimal::ZERO, 0.0), |&(_, p, v, c)| (p, v, c));

        PriceRecord::now(price, Some(volume), Some(change), MOCK_SOURCE)
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    async fn fetch_price(&self, asset_id: &str) -> Result<PriceRecord, PriceError> {
        let record = Self::quote(asset_id);
        if record.is_placeholder() {
            debug!(asset_id, "Asset not in mock table, returning zero quote");
        }
        Ok(record)
    }

    fn name(&self) -> &str {
        MOCK_SOURCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_assets_case_insensitive() {
        let feed = MockPriceSource::new();

        let eth = feed.fetch_price("eth").await.unwrap();
        assert_eq!(eth.price, dec!(2000));
        assert_eq!(eth.volume_24h, Some(dec!(1000000000)));
        assert_eq!(eth.change_24h, Some(5.2));
        assert_eq!(eth.source, "mock");

        let btc = feed.fetch_price("Btc").await.unwrap();
        assert_eq!(btc.price, dec!(40000));
        assert_eq!(btc.volume_24h, Some(dec!(5000000000)));
        assert_eq!(btc.change_24h, Some(3.1));

        let usdc = feed.fetch_price("USDC").await.unwrap();
        assert_eq!(usdc.price, dec!(1));
        assert_eq!(usdc.volume_24h, Some(dec!(10000000000)));
        assert_eq!(usdc.change_24h, Some(0.0));
    }

    #[tokio::test]
    async fn test_unknown_asset_returns_zero_record() {
        let record = MockPriceSource::new().fetch_price("DOGE").await.unwrap();
        assert_eq!(record.price, Decimal::ZERO);
        assert_eq!(record.volume_24h, Some(Decimal::ZERO));
        assert_eq!(record.change_24h, Some(0.0));
        assert_eq!(record.source, "mock");
    }

    #[test]
    fn test_records_are_fresh() {
        let a = MockPriceSource::quote("ETH");
        let b = MockPriceSource::quote("ETH");
        assert!(b.timestamp >= a.timestamp);
    }
}
