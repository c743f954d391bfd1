//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates port interfaces into the two gateway services
//! consumed by the portfolio policy layer.
//!
//! Use cases:
//! - `MarketDataService`: Normalized spot prices (mock or live)
//! - `TradingService`: Trade execution and balance aggregation

pub mod market_data;
pub mod trading;

pub use market_data::MarketDataService;
pub use trading::TradingService;
