//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `PriceSource`: Spot price lookup (mock table or live provider)
//! - `Wallet`: Custodial trade execution and balance queries

pub mod price_source;
pub mod wallet;
