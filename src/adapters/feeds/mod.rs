//! Price Feed Adapters - Spot Price Sources
//!
//! Provides the two `PriceSource` implementations:
//! - Mock: deterministic in-memory table for development and tests
//! - CoinGecko: live HTTP `simple/price` endpoint
//! - Types: provider payload decoding with exact decimals

pub mod coingecko;
pub mod mock;
pub mod types;

pub use coingecko::CoinGeckoPriceSource;
pub use mock::MockPriceSource;
