// In crates/execution/src/live.rs
use crate::{Error, OrderSink, Result};
use api_client::{ApiClient, NewOrderResponse, ProtectiveKind};
use async_trait::async_trait;
use core_types::{OrderAck, OrderRequest};

/// An order sink that places real orders on the Binance exchange.
///
/// Each submission is a market entry followed by reduce-only stop-loss and
/// take-profit orders on the opposite side.
#[derive(Debug, Clone)]
pub struct LiveExecutor {
    /// The API client for communicating with Binance.
    api_client: ApiClient,
}

impl LiveExecutor {
    pub fn new(api_client: ApiClient) -> Self {
        Self { api_client }
    }

    async fn place_protection(&self, order_request: &OrderRequest) -> Result<()> {
        let exit_side = order_request.side.opposite();
        for (kind, price) in [
            (ProtectiveKind::StopLoss, order_request.stop_loss),
            (ProtectiveKind::TakeProfit, order_request.take_profit),
        ] {
            self.api_client
                .place_protective_order(&order_request.symbol, exit_side, kind, price)
                .await?;
            tracing::info!(?kind, %price, "Protective order placed.");
        }
        Ok(())
    }
}

/// Whether an entry response means the position was opened.
fn entry_filled(response: &NewOrderResponse) -> bool {
    matches!(response.status.as_str(), "FILLED" | "PARTIALLY_FILLED")
}

#[async_trait]
impl OrderSink for LiveExecutor {
    fn name(&self) -> &'static str {
        "LiveExecutor"
    }

    async fn submit(&mut self, order_request: &OrderRequest) -> Result<OrderAck> {
        tracing::info!(?order_request, "Executing live order request...");

        // --- Step 1: Place the Market Order ---
        let order_response = match self
            .api_client
            .place_market_order(&order_request.symbol, order_request.side, order_request.volume)
            .await
        {
            Ok(resp) => resp,
            // The exchange answered with a definite refusal.
            Err(api_client::Error::ApiError { code, msg }) => {
                tracing::error!(code, %msg, "Market order rejected by the exchange.");
                return Ok(OrderAck::rejected(code.to_string()));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to place market order.");
                return Err(Error::ExecutionFailed { reason: format!("Failed to place order: {}", e) });
            }
        };

        if !entry_filled(&order_response) {
            tracing::warn!(?order_response, "Market order was not filled.");
            return Ok(OrderAck::rejected(order_response.status));
        }
        tracing::info!(
            order_id = order_response.order_id,
            avg_price = %order_response.avg_price,
            executed_qty = %order_response.executed_qty,
            "Market order filled."
        );

        // --- Step 2: Protect the Position ---
        // The position exists at this point, so a failure here does not undo the entry.
        if let Err(e) = self.place_protection(order_request).await {
            tracing::error!(error = %e, "Position opened but protective orders failed.");
            return Ok(OrderAck::accepted("FILLED_UNPROTECTED"));
        }

        Ok(OrderAck::accepted(order_response.status))
    }
}
