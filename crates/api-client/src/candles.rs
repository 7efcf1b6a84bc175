// In crates/api-client/src/candles.rs

use crate::{ApiClient, Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use core_types::{Kline, Symbol};

/// A source of completed klines.
#[async_trait]
pub trait CandleSource {
    /// The name of the source (e.g., "BinanceRest").
    fn name(&self) -> &'static str;

    /// Fetches up to `count` of the most recent completed klines, oldest first.
    ///
    /// Fails with `Error::DataUnavailable` when the upstream has no completed
    /// kline for the symbol.
    async fn fetch_recent(&self, symbol: &Symbol, timeframe: &str, count: usize) -> Result<Vec<Kline>>;
}

#[async_trait]
impl CandleSource for ApiClient {
    fn name(&self) -> &'static str {
        "BinanceRest"
    }

    async fn fetch_recent(&self, symbol: &Symbol, timeframe: &str, count: usize) -> Result<Vec<Kline>> {
        // One extra kline covers the bar that is still forming.
        let klines = self.get_klines(symbol, timeframe, count + 1).await?;
        let completed = completed_klines(klines, Utc::now().timestamp_millis(), count);

        if completed.is_empty() {
            return Err(Error::DataUnavailable(format!(
                "no completed {timeframe} klines returned for {symbol}"
            )));
        }
        tracing::debug!(%symbol, timeframe, count = completed.len(), "Fetched completed klines.");
        Ok(completed)
    }
}

/// Drops klines that have not closed by `now_ms` and keeps the last `count`.
pub fn completed_klines(mut klines: Vec<Kline>, now_ms: i64, count: usize) -> Vec<Kline> {
    klines.retain(|k| k.close_time < now_ms);
    let excess = klines.len().saturating_sub(count);
    klines.drain(..excess);
    klines
}
