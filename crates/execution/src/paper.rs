// In crates/execution/src/paper.rs

use crate::{OrderSink, Result};
use async_trait::async_trait;
use core_types::{OrderAck, OrderRequest, Side};
use rust_decimal::Decimal;

/// An order sink that fills every well-formed order on paper.
///
/// Orders are kept in memory so a dry run can be inspected afterwards.
#[derive(Debug, Default)]
pub struct PaperExecutor {
    filled: Vec<OrderRequest>,
}

impl PaperExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every order this executor accepted, in submission order.
    pub fn filled(&self) -> &[OrderRequest] {
        &self.filled
    }

    /// Checks the order the way a venue would before accepting it.
    fn validate(order: &OrderRequest) -> std::result::Result<(), &'static str> {
        if order.volume <= Decimal::ZERO {
            return Err("INVALID_VOLUME");
        }
        let bracketed = match order.side {
            Side::Buy => order.stop_loss < order.take_profit,
            Side::Sell => order.stop_loss > order.take_profit,
        };
        if !bracketed {
            return Err("INVALID_STOPS");
        }
        Ok(())
    }
}

#[async_trait]
impl OrderSink for PaperExecutor {
    fn name(&self) -> &'static str {
        "PaperExecutor"
    }

    async fn submit(&mut self, order_request: &OrderRequest) -> Result<OrderAck> {
        if let Err(reason) = Self::validate(order_request) {
            tracing::warn!(?order_request, reason, "Paper order rejected.");
            return Ok(OrderAck::rejected(reason));
        }

        tracing::info!(
            symbol = %order_request.symbol,
            side = %order_request.side,
            volume = %order_request.volume,
            stop_loss = %order_request.stop_loss,
            take_profit = %order_request.take_profit,
            "Paper order filled."
        );
        self.filled.push(order_request.clone());
        Ok(OrderAck::accepted("PAPER_FILLED"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Symbol;
    use rust_decimal_macros::dec;

    fn order(side: Side, volume: Decimal, stop_loss: Decimal, take_profit: Decimal) -> OrderRequest {
        OrderRequest { symbol: Symbol("EURUSD".into()), side, volume, stop_loss, take_profit }
    }

    #[tokio::test]
    async fn fills_a_bracketed_buy() {
        let mut executor = PaperExecutor::new();
        let ack = executor.submit(&order(Side::Buy, dec!(0.01), dec!(1.09), dec!(1.12))).await.unwrap();
        assert!(ack.accepted);
        assert_eq!(executor.filled().len(), 1);
    }

    #[tokio::test]
    async fn rejects_inverted_sell_stops() {
        let mut executor = PaperExecutor::new();
        let ack = executor.submit(&order(Side::Sell, dec!(1), dec!(1.09), dec!(1.12))).await.unwrap();
        assert_eq!(ack, OrderAck::rejected("INVALID_STOPS"));
        assert!(executor.filled().is_empty());
    }

    #[tokio::test]
    async fn rejects_zero_volume() {
        let mut executor = PaperExecutor::new();
        let ack = executor.submit(&order(Side::Buy, dec!(0), dec!(1), dec!(2))).await.unwrap();
        assert!(!ack.accepted);
    }
}
