//! Wallet Adapters - Custody Implementations
//!
//! - Paper: in-memory balances priced by a `PriceSource`, for dry runs

pub mod paper;

pub use paper::PaperWallet;
