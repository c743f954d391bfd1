//! Wallet Port - Custodial Trade Execution Interface
//!
//! The custody layer is an opaque capability: it can submit an
//! asset-to-asset trade, resolve it to a finalized outcome, and report
//! a balance. Amounts cross this boundary as exact decimal text.

use async_trait::async_trait;
use rust_decimal::Decimal;

/// Terminal state of a submitted trade.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizedTrade {
  /// On-chain transaction hash.
  pub transaction_hash: String,
  /// Block explorer link.
  pub transaction_link: String,
  /// Price the trade settled at.
  pub execution_price: Decimal,
  /// Gas consumed, if reported.
  pub gas_used: Option<Decimal>,
}

/// Handle to a submitted trade awaiting finalization.
#[async_trait]
pub trait PendingTrade: Send {
  /// Wait until the wallet reports the trade as finalized.
  async fn resolve(self: Box<Self>) -> anyhow::Result<FinalizedTrade>;
}

/// Trait for custodial wallets.
#[async_trait]
pub trait Wallet: Send + Sync + 'static {
  /// Submit a trade of `amount` units of `from_asset_id` into `to_asset_id`.
  async fn trade(
    &self,
    amount: &str,
    from_asset_id: &str,
    to_asset_id: &str,
  ) -> anyhow::Result<Box<dyn PendingTrade>>;

  /// Current balance of `asset_id`.
  async fn balance_of(&self, asset_id: &str) -> anyhow::Result<Decimal>;
}
