// In crates/app-config/src/types.rs

use crate::{Error, Result};
use risk::types::RiskSettings;
use rust_decimal::Decimal;
use serde::Deserialize;
use strategies::types::SuperTrendSettings;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    /// What to trade and how often to look.
    pub bot: BotSettings,
    /// Indicator parameters.
    #[serde(default)]
    pub strategy: SuperTrendSettings,
    /// Daily limits and protective-order sizing.
    #[serde(default)]
    pub risk: RiskSettings,
    /// Settings for the Binance API.
    #[serde(default)]
    pub binance: BinanceSettings,
    /// Telegram alerts are sent only when this section is present.
    pub telegram: Option<TelegramSettings>,
}

impl Settings {
    /// Rejects values that would make the decision loop misbehave.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(Error::Invalid(msg.to_string()));

        if self.bot.symbol.trim().is_empty() {
            return invalid("bot.symbol must not be empty");
        }
        if self.bot.timeframe.trim().is_empty() {
            return invalid("bot.timeframe must not be empty");
        }
        if self.bot.kline_count < 2 {
            return invalid("bot.kline_count must be at least 2");
        }
        if self.bot.volume <= Decimal::ZERO {
            return invalid("bot.volume must be positive");
        }
        if self.bot.poll_interval_secs == 0 {
            return invalid("bot.poll_interval_secs must be positive");
        }
        if self.strategy.atr_period == 0 {
            return invalid("strategy.atr_period must be positive");
        }
        if self.strategy.multiplier.is_nan() || self.strategy.multiplier <= 0.0 {
            return invalid("strategy.multiplier must be positive");
        }
        if self.risk.max_daily_loss.is_sign_negative() {
            return invalid("risk.max_daily_loss must not be negative");
        }
        let positive = |m: f64| !m.is_nan() && m > 0.0;
        if self.telegram.as_ref().is_some_and(|t| t.request_timeout_secs == 0) {
            return invalid("telegram.request_timeout_secs must be positive");
        }
        if !positive(self.risk.risk_multiplier) || !positive(self.risk.reward_multiplier) {
            return invalid("risk.risk_multiplier and risk.reward_multiplier must be positive");
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Routes orders to the exchange instead of the paper executor.
    #[serde(default)]
    pub live_trading_enabled: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self { log_level: default_log_level(), live_trading_enabled: false }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct BotSettings {
    pub symbol: String,
    /// Exchange interval string, e.g. "5m".
    pub timeframe: String,
    /// Number of completed klines fetched per cycle.
    #[serde(default = "default_kline_count")]
    pub kline_count: usize,
    /// Order volume in base units.
    #[serde(with = "rust_decimal::serde::float")]
    pub volume: Decimal,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Sleep while the risk guard is halted.
    #[serde(default = "default_halted_backoff")]
    pub halted_backoff_secs: u64,
    /// Sleep after a failed cycle.
    #[serde(default = "default_error_backoff")]
    pub error_backoff_secs: u64,
    /// Decimal places of stop-loss and take-profit prices.
    #[serde(default = "default_price_precision")]
    pub price_precision: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BinanceSettings {
    /// The API key for Binance.
    #[serde(default)]
    pub api_key: String,
    /// The secret key for Binance.
    #[serde(default)]
    pub secret_key: String,
    /// The REST API base URL for Binance.
    #[serde(default = "default_rest_base_url")]
    pub rest_base_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for BinanceSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            secret_key: String::new(),
            rest_base_url: default_rest_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct TelegramSettings {
    pub bot_token: String,
    pub chat_id: String,
    #[serde(default = "default_telegram_url")]
    pub api_base_url: String,
    /// Upper bound on one `sendMessage` call, so a stalled endpoint cannot hold up the loop.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Helper functions for serde defaults
fn default_log_level() -> String { "info".into() }
fn default_kline_count() -> usize { 500 }
fn default_poll_interval() -> u64 { 10 }
fn default_halted_backoff() -> u64 { 60 * 60 }
fn default_error_backoff() -> u64 { 5 }
fn default_price_precision() -> u32 { 5 }
fn default_rest_base_url() -> String { "https://fapi.binance.com".into() }
fn default_request_timeout() -> u64 { 10 }
fn default_telegram_url() -> String { "https://api.telegram.org".into() }
