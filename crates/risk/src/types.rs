// In crates/risk/src/types.rs

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Daily limits and protective-order sizing.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RiskSettings {
    /// Trading halts for the day once cumulative PnL is at or below `-max_daily_loss`.
    #[serde(default = "default_max_daily_loss", with = "rust_decimal::serde::float")]
    pub max_daily_loss: Decimal,
    /// Trading halts for the day once this many trades were accepted.
    #[serde(default = "default_max_trades_per_day")]
    pub max_trades_per_day: u32,
    /// Stop-loss distance in ATR units. Independent of the indicator's band multiplier.
    #[serde(default = "default_risk_multiplier")]
    pub risk_multiplier: f64,
    /// Take-profit distance as a multiple of the stop-loss distance.
    #[serde(default = "default_reward_multiplier")]
    pub reward_multiplier: f64,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            max_daily_loss: default_max_daily_loss(),
            max_trades_per_day: default_max_trades_per_day(),
            risk_multiplier: default_risk_multiplier(),
            reward_multiplier: default_reward_multiplier(),
        }
    }
}

fn default_max_daily_loss() -> Decimal { dec!(100) }
fn default_max_trades_per_day() -> u32 { 5 }
fn default_risk_multiplier() -> f64 { 1.0 }
fn default_reward_multiplier() -> f64 { 1.5 }
