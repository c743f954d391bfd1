//! Paper Wallet - In-Memory Custody for Dry Runs
//!
//! Simulates a custodial wallet against seeded balances. Trades are
//! priced through a `PriceSource`, held as pending handles, and only
//! move funds when resolved. Every trade has the quote asset on one leg.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::config::PaperWalletConfig;
use crate::domain::assets::supported_asset;
use crate::domain::trade::QUOTE_ASSET;
use crate::ports::price_source::PriceSource;
use crate::ports::wallet::{FinalizedTrade, PendingTrade, Wallet};

type Balances = Arc<RwLock<HashMap<String, Decimal>>>;

/// In-memory wallet that fills at the price source's spot price.
pub struct PaperWallet {
  balances: Balances,
  prices: Arc<dyn PriceSource>,
  explorer_url: String,
}

impl PaperWallet {
  /// Create a wallet seeded from config. Asset ids are lower-cased.
  pub fn new(prices: Arc<dyn PriceSource>, config: &PaperWalletConfig) -> Self {
    let seeded = config
      .balances
      .iter()
      .map(|(asset, amount)| (asset.to_lowercase(), *amount))
      .collect();

    Self {
      balances: Arc::new(RwLock::new(seeded)),
      prices,
      explorer_url: config.explorer_url.trim_end_matches('/').to_string(),
    }
  }

  /// Copy of all current balances.
  pub async fn balances(&self) -> HashMap<String, Decimal> {
    self.balances.read().await.clone()
  }
}

#[async_trait]
impl Wallet for PaperWallet {
  #[instrument(skip(self))]
  async fn trade(
    &self,
    amount: &str,
    from_asset_id: &str,
    to_asset_id: &str,
  ) -> Result<Box<dyn PendingTrade>> {
    let amount = Decimal::from_str(amount)
      .with_context(|| format!("Invalid trade amount: {amount}"))?;
    anyhow::ensure!(amount > Decimal::ZERO, "Trade amount must be positive, got {amount}");

    let from = from_asset_id.to_lowercase();
    let to = to_asset_id.to_lowercase();
    anyhow::ensure!(from != to, "Cannot trade {from} into itself");

    let buying = if from == QUOTE_ASSET {
      true
    } else if to == QUOTE_ASSET {
      false
    } else {
      anyhow::bail!("Paper wallet only trades against {QUOTE_ASSET}, got {from} -> {to}");
    };

    if let Some(asset) = supported_asset(&from) {
      anyhow::ensure!(
        amount >= asset.min_trade_size,
        "Trade of {amount} {from} is below the minimum of {}",
        asset.min_trade_size
      );
    }

    let priced_asset = if buying { &to } else { &from };
    let price = self
      .prices
      .fetch_price(priced_asset)
      .await
      .with_context(|| format!("No price for {priced_asset}"))?
      .price;
    anyhow::ensure!(price > Decimal::ZERO, "No market price for {priced_asset}");

    let available = self.balance_of(&from).await?;
    anyhow::ensure!(
      available >= amount,
      "Insufficient {from} balance: have {available}, need {amount}"
    );

    debug!(%amount, %price, from = %from, to = %to, "Paper trade submitted");

    Ok(Box::new(PaperFill {
      balances: Arc::clone(&self.balances),
      explorer_url: self.explorer_url.clone(),
      from,
      to,
      amount,
      price,
      buying,
    }))
  }

  async fn balance_of(&self, asset_id: &str) -> Result<Decimal> {
    let balances = self.balances.read().await;
    Ok(
      balances
        .get(&asset_id.to_lowercase())
        .copied()
        .unwrap_or(Decimal::ZERO),
    )
  }
}

/// Pending paper trade. Funds move on `resolve`.
struct PaperFill {
  balances: Balances,
  explorer_url: String,
  from: String,
  to: String,
  amount: Decimal,
  price: Decimal,
  buying: bool,
}

impl PaperFill {
  /// Units of `to` received for `amount` of `from`, truncated to the
  /// receiving asset's on-chain decimals.
  fn received(&self) -> Result<Decimal> {
    let raw = if self.buying {
      self.amount.checked_div(self.price)
    } else {
      self.amount.checked_mul(self.price)
    }
    .context("Paper fill overflowed")?;

    Ok(match supported_asset(&self.to) {
      Some(asset) => raw.round_dp_with_strategy(asset.decimals, RoundingStrategy::ToZero),
      None => raw,
    })
  }
}

#[async_trait]
impl PendingTrade for PaperFill {
  async fn resolve(self: Box<Self>) -> Result<FinalizedTrade> {
    let received = self.received()?;

    let mut balances = self.balances.write().await;
    let available = balances.get(&self.from).copied().unwrap_or(Decimal::ZERO);
    anyhow::ensure!(
      available >= self.amount,
      "Insufficient {} balance at settlement: have {available}, need {}",
      self.from,
      self.amount
    );

    balances.insert(self.from.clone(), available - self.amount);
    *balances.entry(self.to.clone()).or_insert(Decimal::ZERO) += received;
    drop(balances);

    let transaction_hash = format!("0x{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    let transaction_link = format!("{}/{}", self.explorer_url, transaction_hash);

    info!(
      tx = %transaction_hash,
      spent = %self.amount,
      from = %self.from,
      received = %received,
      to = %self.to,
      price = %self.price,
      "Paper trade settled"
    );

    Ok(FinalizedTrade {
      transaction_hash,
      transaction_link,
      execution_price: self.price,
      gas_used: Some(Decimal::ZERO),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::adapters::feeds::MockPriceSource;
  use rust_decimal_macros::dec;

  fn wallet(balances: &[(&str, Decimal)]) -> PaperWallet {
    let config = PaperWalletConfig {
      explorer_url: "https://explorer.test/tx/".to_string(),
      balances: balances
        .iter()
        .map(|(k, v)| ((*k).to_string(), *v))
        .collect(),
    };
    PaperWallet::new(Arc::new(MockPriceSource::new()), &config)
  }

  #[tokio::test]
  async fn test_buy_moves_quote_into_asset() {
    let wallet = wallet(&[("USDC", dec!(5000))]);

    let pending = wallet.trade("3000", "usdc", "eth").await.unwrap();
    // nothing moves until resolved
    assert_eq!(wallet.balance_of("usdc").await.unwrap(), dec!(5000));

    let fill = pending.resolve().await.unwrap();
    assert_eq!(fill.execution_price, dec!(2000));
    assert!(fill.transaction_hash.starts_with("0x"));
    assert_eq!(fill.transaction_hash.len(), 66);
    assert!(fill.transaction_link.starts_with("https://explorer.test/tx/0x"));

    assert_eq!(wallet.balance_of("USDC").await.unwrap(), dec!(2000));
    assert_eq!(wallet.balance_of("eth").await.unwrap(), dec!(1.5));
  }

  #[tokio::test]
  async fn test_sell_moves_asset_into_quote() {
    let wallet = wallet(&[("btc", dec!(0.5))]);

    let pending = wallet.trade("0.25", "btc", "usdc").await.unwrap();
    pending.resolve().await.unwrap();

    assert_eq!(wallet.balance_of("btc").await.unwrap(), dec!(0.25));
    assert_eq!(wallet.balance_of("usdc").await.unwrap(), dec!(10000));
  }

  #[tokio::test]
  async fn test_overdraft_rejected_at_submission() {
    let wallet = wallet(&[("usdc", dec!(100))]);
    let err = wallet.trade("500", "usdc", "eth").await.err().unwrap();
    assert!(err.to_string().contains("Insufficient usdc balance"));
  }

  #[tokio::test]
  async fn test_below_minimum_rejected() {
    let wallet = wallet(&[("eth", dec!(1))]);
    let err = wallet.trade("0.001", "eth", "usdc").await.err().unwrap();
    assert!(err.to_string().contains("below the minimum"));
  }

  #[tokio::test]
  async fn test_unpriced_asset_rejected() {
    let wallet = wallet(&[("usdc", dec!(100))]);
    let err = wallet.trade("50", "usdc", "doge").await.err().unwrap();
    assert!(err.to_string().contains("No market price for doge"));
  }

  #[tokio::test]
  async fn test_non_quote_pair_rejected() {
    let wallet = wallet(&[("eth", dec!(1))]);
    assert!(wallet.trade("0.5", "eth", "btc").await.is_err());
  }

  #[tokio::test]
  async fn test_invalid_amount_rejected() {
    let wallet = wallet(&[("usdc", dec!(100))]);
    assert!(wallet.trade("abc", "usdc", "eth").await.is_err());
    assert!(wallet.trade("-5", "usdc", "eth").await.is_err());
  }

  #[tokio::test]
  async fn test_settlement_rechecks_balance() {
    let wallet = wallet(&[("usdc", dec!(100))]);
    let first = wallet.trade("80", "usdc", "eth").await.unwrap();
    let second = wallet.trade("80", "usdc", "eth").await.unwrap();

    first.resolve().await.unwrap();
    assert!(second.resolve().await.is_err());
    assert_eq!(wallet.balance_of("usdc").await.unwrap(), dec!(20));
  }

  #[tokio::test]
  async fn test_unknown_balance_is_zero() {
    let wallet = wallet(&[]);
    assert_eq!(wallet.balance_of("sol").await.unwrap(), Decimal::ZERO);
  }
}
