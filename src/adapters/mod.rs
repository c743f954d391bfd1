//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! infrastructure. Each sub-module groups adapters by concern.
//!
//! Adapter categories:
//! - `feeds`: Spot price sources (mock table, CoinGecko HTTP)
//! - `wallet`: In-memory paper wallet for dry runs

pub mod feeds;
pub mod wallet;
