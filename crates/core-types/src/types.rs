// In crates/core-types/src/types.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A trading pair symbol, e.g. "EURUSD" or "BTCUSDT".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single completed bar of a fixed timeframe.
///
/// Prices are kept as `f64` because every consumer of a kline is
/// indicator math. Money-facing values (order volume, SL/TP) are `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kline {
    /// Open time in milliseconds since the Unix epoch.
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Close time in milliseconds since the Unix epoch.
    pub close_time: i64,
}

impl Kline {
    /// True when every price is finite and the bar is internally consistent.
    pub fn is_well_formed(&self) -> bool {
        [self.open, self.high, self.low, self.close]
            .iter()
            .all(|v| v.is_finite())
            && self.low <= self.high
    }
}

// Lets `ta` indicators consume klines directly.
impl ta::Open for Kline {
    fn open(&self) -> f64 {
        self.open
    }
}

impl ta::High for Kline {
    fn high(&self) -> f64 {
        self.high
    }
}

impl ta::Low for Kline {
    fn low(&self) -> f64 {
        self.low
    }
}

impl ta::Close for Kline {
    fn close(&self) -> f64 {
        self.close
    }
}

impl ta::Volume for Kline {
    fn volume(&self) -> f64 {
        self.volume
    }
}

/// The direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Exchange wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trend polarity of a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Trend {
    Up,
    /// The first bar of any series is `Down` by convention.
    #[default]
    Down,
}

/// A fully specified order handed to an order sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRequest {
    pub symbol: Symbol,
    pub side: Side,
    pub volume: Decimal,
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
}

/// The synchronous answer of an order sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderAck {
    pub accepted: bool,
    /// Exchange or executor specific code, e.g. "FILLED" or "-2019".
    pub reason_code: String,
}

impl OrderAck {
    pub fn accepted(reason_code: impl Into<String>) -> Self {
        Self { accepted: true, reason_code: reason_code.into() }
    }

    pub fn rejected(reason_code: impl Into<String>) -> Self {
        Self { accepted: false, reason_code: reason_code.into() }
    }
}
