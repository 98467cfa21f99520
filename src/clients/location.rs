use async_trait::async_trait;

use crate::framework::HandoffError;
use crate::model::Cart;

/// A place an engine can collect a cart from and deliver a cart to.
///
/// Both operations wait until the location is ready. The readiness checks are
/// non-blocking reads of the latest snapshot, for instrumentation only: a
/// `true` may already be stale by the time the caller acts on it.
#[async_trait]
pub trait Location: Send + Sync {
    /// Name used in logs (`elevator`, `station 3`).
    fn name(&self) -> String;

    async fn collect(&self) -> Result<Cart, HandoffError>;

    async fn deliver(&self, cart: Cart) -> Result<(), HandoffError>;

    /// Whether `collect` would proceed right now.
    fn collect_ready(&self) -> bool;

    /// Whether `deliver` would proceed right now.
    fn deliver_ready(&self) -> bool;
}
