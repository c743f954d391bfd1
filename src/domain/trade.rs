//! Core trading domain types.
//!
//! Defines the trade side, the normalized outcome of a single execution
//! attempt, and the balance map returned by balance aggregation.
//! These types are the foundation of the hexagonal architecture's inner ring.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────
// Constants shared across domain and usecases
// ────────────────────────────────────────────

/// Stablecoin against which buy/sell direction is defined.
pub const QUOTE_ASSET: &str = "usdc";

/// Default slippage tolerance handed to the wallet (1%).
pub const DEFAULT_SLIPPAGE: f64 = 0.01;

/// Balance per requested asset identifier.
pub type BalanceMap = HashMap<String, Decimal>;

// ────────────────────────────────────────────
// Enums
// ────────────────────────────────────────────

/// Trade side, the canonical enum used by both domain and ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// Resolve the `(from, to)` wallet legs for a trade on `asset_id`.
    ///
    /// Buying spends the quote asset to acquire `asset_id`; selling is
    /// the inverse. Asset ids are lower-cased for the wallet.
    pub fn legs(self, asset_id: &str) -> (String, String) {
        let asset = asset_id.to_lowercase();
        match self {
            Self::Buy => (QUOTE_ASSET.to_string(), asset),
            Self::Sell => (asset, QUOTE_ASSET.to_string()),
        }
    }
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

impl std::str::FromStr for TradeSide {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(anyhow::anyhow!("Unknown trade side: {other}")),
        }
    }
}

/// Flat status of a trade attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Completed,
    Failed,
}

// ────────────────────────────────────────────
// Trade result
// ────────────────────────────────────────────

/// Terminal branch of a trade attempt.
///
/// Completed fields and the error message live in different variants,
/// so a result can never carry both or neither.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TradeOutcome {
    /// Wallet finalized the trade.
    Completed {
        /// On-chain transaction hash.
        transaction_hash: String,
        /// Block explorer link for the transaction.
        transaction_link: String,
        /// Price the trade settled at.
        execution_price: Decimal,
        /// Gas consumed, when the wallet reports it.
        gas_used: Option<Decimal>,
    },
    /// Submission or resolution failed.
    Failed {
        /// Description of the failure.
        error_message: String,
    },
}

/// Outcome of exactly one execution attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeResult {
    /// Asset id as supplied by the caller.
    pub asset_id: String,
    /// Requested side.
    pub side: TradeSide,
    /// Requested amount, echoed unchanged.
    pub amount: Decimal,
    /// Completed details or failure description.
    #[serde(flatten)]
    pub outcome: TradeOutcome,
    /// When this result was constructed.
    pub timestamp: DateTime<Utc>,
}

impl TradeResult {
    /// Build a completed result.
    pub fn completed(
        asset_id: impl Into<String>,
        side: TradeSide,
        amount: Decimal,
        transaction_hash: String,
        transaction_link: String,
        execution_price: Decimal,
        gas_used: Option<Decimal>,
    ) -> Self {
        Self {
            asset_id: asset_id.into(),
            side,
            amount,
            outcome: TradeOutcome::Completed {
                transaction_hash,
                transaction_link,
                execution_price,
                gas_used,
            },
            timestamp: Utc::now(),
        }
    }

    /// Build a failed result.
    pub fn failed(
        asset_id: impl Into<String>,
        side: TradeSide,
        amount: Decimal,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            asset_id: asset_id.into(),
            side,
            amount,
            outcome: TradeOutcome::Failed {
                error_message: error_message.into(),
            },
            timestamp: Utc::now(),
        }
    }

    pub fn status(&self) -> TradeStatus {
        match self.outcome {
            TradeOutcome::Completed { .. } => TradeStatus::Completed,
            TradeOutcome::Failed { .. } => TradeStatus::Failed,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status() == TradeStatus::Completed
    }

    pub fn transaction_hash(&self) -> Option<&str> {
        match &self.outcome {
            TradeOutcome::Completed { transaction_hash, .. } => Some(transaction_hash),
            TradeOutcome::Failed { .. } => None,
        }
    }

    pub fn transaction_link(&self) -> Option<&str> {
        match &self.outcome {
            TradeOutcome::Completed { transaction_link, .. } => Some(transaction_link),
            TradeOutcome::Failed { .. } => None,
        }
    }

    pub fn execution_price(&self) -> Option<Decimal> {
        match &self.outcome {
            TradeOutcome::Completed { execution_price, .. } => Some(*execution_price),
            TradeOutcome::Failed { .. } => None,
        }
    }

    pub fn gas_used(&self) -> Option<Decimal> {
        match &self.outcome {
            TradeOutcome::Completed { gas_used, .. } => *gas_used,
            TradeOutcome::Failed { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            TradeOutcome::Completed { .. } => None,
            TradeOutcome::Failed { error_message } => Some(error_message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_buy_spends_quote_asset() {
        let (from, to) = TradeSide::Buy.legs("ETH");
        assert_eq!(from, "usdc");
        assert_eq!(to, "eth");
    }

    #[test]
    fn test_sell_receives_quote_asset() {
        let (from, to) = TradeSide::Sell.legs("ETH");
        assert_eq!(from, "eth");
        assert_eq!(to, "usdc");
    }

    #[test]
    fn test_completed_accessors() {
        let result = TradeResult::completed(
            "ETH",
            TradeSide::Buy,
            dec!(1.5),
            "0xabc".to_string(),
            "https://explorer/tx/0xabc".to_string(),
            dec!(2000.25),
            Some(dec!(21000)),
        );
        assert_eq!(result.status(), TradeStatus::Completed);
        assert_eq!(result.transaction_hash(), Some("0xabc"));
        assert_eq!(result.execution_price(), Some(dec!(2000.25)));
        assert_eq!(result.gas_used(), Some(dec!(21000)));
        assert!(result.error_message().is_none());
    }

    #[test]
    fn test_failed_accessors() {
        let result = TradeResult::failed("BTC", TradeSide::Sell, dec!(0.01), "insufficient funds");
        assert_eq!(result.status(), TradeStatus::Failed);
        assert_eq!(result.error_message(), Some("insufficient funds"));
        assert!(result.transaction_hash().is_none());
        assert!(result.transaction_link().is_none());
        assert!(result.execution_price().is_none());
        assert!(result.gas_used().is_none());
        assert_eq!(result.amount, dec!(0.01));
    }

    #[test]
    fn test_result_serializes_flat_with_status_tag() {
        let result = TradeResult::failed("ETH", TradeSide::Buy, dec!(1.5), "boom");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error_message"], "boom");
        assert_eq!(json["side"], "buy");
        assert_eq!(json["amount"], "1.5");
        assert!(json.get("transaction_hash").is_none());
    }

    #[test]
    fn test_trade_side_parse_and_display() {
        assert_eq!("BUY".parse::<TradeSide>().unwrap(), TradeSide::Buy);
        assert_eq!("sell".parse::<TradeSide>().unwrap(), TradeSide::Sell);
        assert!("hold".parse::<TradeSide>().is_err());
        assert_eq!(TradeSide::Buy.to_string(), "buy");
    }
}
