// In crates/risk/src/guard.rs

use crate::types::RiskSettings;
use crate::{Error, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Trade count and PnL accumulated over one trading day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyStats {
    pub trading_date: NaiveDate,
    pub trade_count: u32,
    pub cumulative_pnl: Decimal,
}

impl DailyStats {
    pub fn new(today: NaiveDate) -> Self {
        Self { trading_date: today, trade_count: 0, cumulative_pnl: Decimal::ZERO }
    }

    /// Zeroes the counters and stamps `today` as the trading date.
    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }
}

/// The gate state derived from the day's stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskState {
    Active,
    /// The daily loss cap was hit; no trading until the next day.
    LossHalted,
    /// The daily trade cap was hit; no trading until the next day.
    CapHalted,
}

/// Bounds trade frequency and daily loss.
///
/// The guard owns its `DailyStats` and never reads the wall clock: callers pass
/// the current date into every cycle, which drives the lazy day rollover.
#[derive(Debug, Clone)]
pub struct RiskGuard {
    settings: RiskSettings,
    stats: DailyStats,
}

impl RiskGuard {
    pub fn new(settings: RiskSettings, today: NaiveDate) -> Result<Self> {
        if settings.max_daily_loss.is_sign_negative() {
            return Err(Error::InvalidParameters(format!(
                "max_daily_loss must be non-negative, got {}",
                settings.max_daily_loss
            )));
        }
        Ok(Self::with_stats(settings, DailyStats::new(today)))
    }

    /// Restores a guard from previously captured stats.
    pub fn with_stats(settings: RiskSettings, stats: DailyStats) -> Self {
        Self { settings, stats }
    }

    pub fn settings(&self) -> &RiskSettings {
        &self.settings
    }

    pub fn stats(&self) -> &DailyStats {
        &self.stats
    }

    /// Rolls the stats over when `today` differs from the stored date, then
    /// derives the gate state. Returns whether a rollover happened alongside
    /// the state.
    pub fn evaluate(&mut self, today: NaiveDate) -> (RiskState, bool) {
        let rolled_over = self.stats.trading_date != today;
        if rolled_over {
            self.stats.reset(today);
        }
        (self.state(), rolled_over)
    }

    /// The gate state for the stored stats, without a rollover check.
    pub fn state(&self) -> RiskState {
        if self.stats.cumulative_pnl <= -self.settings.max_daily_loss {
            RiskState::LossHalted
        } else if self.stats.trade_count >= self.settings.max_trades_per_day {
            RiskState::CapHalted
        } else {
            RiskState::Active
        }
    }

    /// Whether a new decision may execute on `today`.
    pub fn admit(&mut self, today: NaiveDate) -> bool {
        self.evaluate(today).0 == RiskState::Active
    }

    /// Records one accepted decision with its PnL estimate.
    pub fn record_trade(&mut self, pnl_estimate: Decimal) {
        self.stats.trade_count += 1;
        self.stats.cumulative_pnl += pnl_estimate;
    }

    /// Books realized PnL reported after the fact, without counting a trade.
    pub fn record_settlement(&mut self, realized_pnl: Decimal) {
        self.stats.cumulative_pnl += realized_pnl;
    }
}
