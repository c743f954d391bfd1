//! Trading Use Case - Trade Execution and Balance Aggregation
//!
//! Issues trades against the `Wallet` port and normalizes every
//! outcome into a `TradeResult`. Nothing escapes as an error: wallet
//! failures become `Failed` results, and failed balance lookups become
//! zero entries, so callers iterating many assets are never interrupted.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::{error, info, instrument, warn};

use crate::domain::trade::{BalanceMap, TradeResult, TradeSide};
use crate::ports::wallet::{FinalizedTrade, Wallet};

/// Executes trades and balance queries through a custodial wallet.
pub struct TradingService<W: Wallet> {
  wallet: Arc<W>,
  /// Upper bound on submit + resolve. None waits indefinitely.
  trade_timeout: Option<Duration>,
}

impl<W: Wallet> TradingService<W> {
  /// Create a new trading service.
  pub fn new(wallet: Arc<W>) -> Self {
    Self {
      wallet,
      trade_timeout: None,
    }
  }

  /// Bound each execution by `timeout`; expiry yields a failed result.
  #[must_use]
  pub fn with_trade_timeout(mut self, timeout: Duration) -> Self {
    self.trade_timeout = Some(timeout);
    self
  }

  /// Execute a trade of `amount` on `asset_id`.
  ///
  /// `Buy` spends the quote asset for `asset_id`; `Sell` is the inverse.
  /// `max_slippage` is recorded but enforced by the wallet, not here.
  #[instrument(skip(self, amount), fields(%amount))]
  pub async fn execute_trade(
    &self,
    asset_id: &str,
    amount: Decimal,
    side: TradeSide,
    max_slippage: f64,
  ) -> TradeResult {
    let attempt = self.submit_and_resolve(asset_id, amount, side);

    let outcome = match self.trade_timeout {
      Some(limit) => tokio::time::timeout(limit, attempt)
        .await
        .unwrap_or_else(|_| {
          Err(anyhow::anyhow!(
            "Trade did not finalize within {}s",
            limit.as_secs_f64()
          ))
        }),
      None => attempt.await,
    };

    match outcome {
      Ok(fill) => {
        info!(
          tx = %fill.transaction_hash,
          price = %fill.execution_price,
          "Trade completed"
        );
        TradeResult::completed(
          asset_id,
          side,
          amount,
          fill.transaction_hash,
          fill.transaction_link,
          fill.execution_price,
          fill.gas_used,
        )
      }
      Err(e) => {
        let message = format!("{e:#}");
        error!(asset_id, %side, error = %message, "Trade execution failed");
        TradeResult::failed(asset_id, side, amount, message)
      }
    }
  }

  /// Submit the trade and wait for the wallet to finalize it.
  async fn submit_and_resolve(
    &self,
    asset_id: &str,
    amount: Decimal,
    side: TradeSide,
  ) -> Result<FinalizedTrade> {
    let (from, to) = side.legs(asset_id);

    let pending = self
      .wallet
      .trade(&amount.to_string(), &from, &to)
      .await
      .with_context(|| format!("Trade submission {from} -> {to} rejected"))?;

    pending
      .resolve()
      .await
      .with_context(|| format!("Trade {from} -> {to} failed to finalize"))
  }

  /// Look up the balance of every asset in `asset_ids`.
  ///
  /// Lookups run one after another and are isolated: a failure is
  /// logged and recorded as zero for that asset only.
  #[instrument(skip_all, fields(assets = asset_ids.len()))]
  pub async fn check_balances<S: AsRef<str>>(&self, asset_ids: &[S]) -> BalanceMap {
    let mut balances = BalanceMap::with_capacity(asset_ids.len());

    for asset_id in asset_ids {
      let asset_id = asset_id.as_ref();
      let balance = match self.wallet.balance_of(&asset_id.to_lowercase()).await {
        Ok(balance) => balance,
        Err(e) => {
          warn!(asset_id, error = %e, "Error getting balance");
          Decimal::ZERO
        }
      };
      balances.insert(asset_id.to_string(), balance);
    }

    balances
  }
}
