//! Price Source Port - Spot Price Interface
//!
//! Defines the trait every price provider implements. The market data
//! service holds one implementation chosen at construction (mock table
//! or live HTTP provider) and never branches on the mode itself.

use async_trait::async_trait;

use crate::domain::price::PriceRecord;
use crate::error::PriceError;

/// Trait for spot price providers.
#[async_trait]
pub trait PriceSource: Send + Sync + 'static {
  /// Fetch a fresh price record for `asset_id`.
  ///
  /// # Errors
  /// Returns `PriceError` when the asset cannot be resolved or the
  /// provider cannot be reached or decoded.
  async fn fetch_price(&self, asset_id: &str) -> Result<PriceRecord, PriceError>;

  /// Identifier written into `PriceRecord::source`.
  fn name(&self) -> &str;

  /// Release any held network resources. Must be idempotent.
  async fn close(&self) {}
}
