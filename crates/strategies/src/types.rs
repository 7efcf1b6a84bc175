// In crates/strategies/src/types.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SuperTrendSettings {
    /// Rolling window of the ATR mean.
    #[serde(default = "default_atr_period")]
    pub atr_period: u32,
    /// Band width in ATR units.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

impl Default for SuperTrendSettings {
    fn default() -> Self {
        Self { atr_period: default_atr_period(), multiplier: default_multiplier() }
    }
}

fn default_atr_period() -> u32 { 10 }
fn default_multiplier() -> f64 { 3.0 }
