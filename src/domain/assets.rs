//! Supported asset table.
//!
//! Static metadata for the assets the gateway knows how to price and
//! trade. Lookups are case-insensitive on the symbol.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Static metadata for a tradeable asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedAsset {
    /// Ticker symbol, upper case.
    pub symbol: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// On-chain decimals.
    pub decimals: u32,
    /// Smallest trade the venue accepts.
    pub min_trade_size: Decimal,
}

pub static SUPPORTED_ASSETS: [SupportedAsset; 3] = [
    SupportedAsset {
        symbol: "ETH",
        name: "Ethereum",
        decimals: 18,
        min_trade_size: dec!(0.01),
    },
    SupportedAsset {
        symbol: "USDC",
        name: "USD Coin",
        decimals: 6,
        min_trade_size: dec!(10),
    },
    SupportedAsset {
        symbol: "BTC",
        name: "Bitcoin",
        decimals: 8,
        min_trade_size: dec!(0.001),
    },
];

/// Look up an asset by symbol, ignoring case.
pub fn supported_asset(symbol: &str) -> Option<&'static SupportedAsset> {
    SUPPORTED_ASSETS
        .iter()
        .find(|a| a.symbol.eq_ignore_ascii_case(symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let eth = supported_asset("eth").unwrap();
        assert_eq!(eth.symbol, "ETH");
        assert_eq!(eth.decimals, 18);
        assert_eq!(supported_asset("Usdc").unwrap().decimals, 6);
    }

    #[test]
    fn test_unknown_asset() {
        assert!(supported_asset("DOGE").is_none());
    }

    #[test]
    fn test_min_trade_sizes() {
        assert_eq!(supported_asset("BTC").unwrap().min_trade_size, dec!(0.001));
        assert_eq!(supported_asset("USDC").unwrap().min_trade_size, dec!(10));
    }
}
