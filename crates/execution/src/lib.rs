// In crates/execution/src/lib.rs

use async_trait::async_trait;
use core_types::{OrderAck, OrderRequest};
pub mod error;
pub mod live;
pub mod paper;

// Re-export public types
pub use error::{Error, Result};
pub use live::LiveExecutor;
pub use paper::PaperExecutor;

/// The universal interface for an order sink.
///
/// An `OrderSink` takes a fully specified `OrderRequest` (side, volume and
/// protective levels) and submits it to a target, which could be a live
/// exchange or a paper book. The call resolves once the outcome is known.
#[async_trait]
pub trait OrderSink {
    /// The name of the sink (e.g., "LiveExecutor", "PaperExecutor").
    fn name(&self) -> &'static str;

    /// Submits an order.
    ///
    /// # Returns
    ///
    /// * `Ok(ack)` with `ack.accepted == true` when the order was placed.
    /// * `Ok(ack)` with `ack.accepted == false` when the venue refused it.
    /// * `Err(_)` when the outcome could not be determined.
    async fn submit(&mut self, order_request: &OrderRequest) -> Result<OrderAck>;
}
