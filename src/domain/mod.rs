//! Domain layer - Core business types.
//!
//! Pure values shared by the price feeds and the trade executor.
//! No I/O here (hexagonal architecture inner ring).

pub mod assets;
pub mod price;
pub mod trade;

// Re-export core types for convenience
pub use assets::{supported_asset, SupportedAsset, SUPPORTED_ASSETS};
pub use price::PriceRecord;
pub use trade::{
    BalanceMap, TradeOutcome, TradeResult, TradeSide, TradeStatus, DEFAULT_SLIPPAGE, QUOTE_ASSET,
};
