// In crates/strategies/src/atr.rs

use crate::{Error, Result};
use core_types::Kline;
use ta::indicators::{SimpleMovingAverage as Sma, TrueRange};
use ta::Next;

/// Computes the Average True Range series for `klines`.
///
/// The output is index-aligned with the input. Each value is the simple mean of
/// the last `window` true ranges, expanding over the first `window - 1` bars.
/// The first bar has no previous close, so its true range is `high - low`.
///
/// Non-finite prices are not filtered here; callers validate klines first.
pub fn compute_atr(klines: &[Kline], window: usize) -> Result<Vec<f64>> {
    let mut true_range = TrueRange::new();
    let mut mean = Sma::new(window)
        .map_err(|e| Error::InvalidParameters(format!("ATR window {window}: {e:?}")))?;

    Ok(klines
        .iter()
        .map(|kline| mean.next(true_range.next(kline)))
        .collect())
}
