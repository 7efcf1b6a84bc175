// In crates/app-config/src/lib.rs

use config::{Config, Environment, File, FileFormat};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::Settings;

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
///
/// The merged settings are validated before they are returned.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
    load_settings_from("config", &environment)
}

/// Same as [`load_settings`] with an explicit config directory and environment.
pub fn load_settings_from(config_dir: &str, environment: &str) -> Result<Settings> {
    let settings = Config::builder()
        .add_source(File::with_name(&format!("{}/base", config_dir)))
        .add_source(File::with_name(&format!("{}/{}", config_dir, environment)).required(false))
        // Environment variables, e.g. `APP_BOT__SYMBOL=BTCUSDT`.
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let settings: Settings = settings.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}

/// Parses settings from a single TOML document, without file or env layers.
pub fn parse_settings(toml: &str) -> Result<Settings> {
    let settings: Settings = Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    const MINIMAL: &str = r#"
        [bot]
        symbol = "BTCUSDT"
        timeframe = "5m"
        volume = 0.01
    "#;

    #[test]
    fn minimal_document_takes_defaults() {
        let settings = parse_settings(MINIMAL).unwrap();
        assert_eq!(settings.bot.symbol, "BTCUSDT");
        assert_eq!(settings.bot.kline_count, 500);
        assert_eq!(settings.bot.poll_interval_secs, 10);
        assert_eq!(settings.bot.halted_backoff_secs, 3600);
        assert_eq!(settings.strategy.atr_period, 10);
        assert_eq!(settings.strategy.multiplier, 3.0);
        assert_eq!(settings.risk.max_trades_per_day, 5);
        assert_eq!(settings.risk.max_daily_loss, Decimal::from(100));
        assert_eq!(settings.risk.risk_multiplier, 1.0);
        assert_eq!(settings.risk.reward_multiplier, 1.5);
        assert!(!settings.app.live_trading_enabled);
        assert!(settings.telegram.is_none());
    }

    #[test]
    fn sections_override_defaults() {
        let doc = format!(
            "{MINIMAL}\n[strategy]\natr_period = 14\nmultiplier = 2.5\n\n[risk]\nmax_daily_loss = 250.0\nmax_trades_per_day = 3\n\n[telegram]\nbot_token = \"t\"\nchat_id = \"c\"\n"
        );
        let settings = parse_settings(&doc).unwrap();
        assert_eq!(settings.strategy.atr_period, 14);
        assert_eq!(settings.strategy.multiplier, 2.5);
        assert_eq!(settings.risk.max_trades_per_day, 3);
        assert_eq!(settings.risk.max_daily_loss, Decimal::from(250));
        let telegram = settings.telegram.unwrap();
        assert_eq!(telegram.api_base_url, "https://api.telegram.org");
        assert_eq!(telegram.request_timeout_secs, 10);
    }

    #[test]
    fn zero_telegram_timeout_is_invalid() {
        let doc = format!("{MINIMAL}\n[telegram]\nbot_token = \"t\"\nchat_id = \"c\"\nrequest_timeout_secs = 0\n");
        assert!(matches!(parse_settings(&doc), Err(Error::Invalid(_))));
    }

    #[test]
    fn decimals_accept_floats_and_integers() {
        let doc = MINIMAL.replace("volume = 0.01", "volume = 2") + "\n[risk]\nmax_daily_loss = 75.5\n";
        let settings = parse_settings(&doc).unwrap();
        assert_eq!(settings.bot.volume, Decimal::from(2));
        assert_eq!(settings.risk.max_daily_loss, Decimal::new(755, 1));
    }

    #[test]
    fn zero_atr_period_is_invalid() {
        let doc = format!("{MINIMAL}\n[strategy]\natr_period = 0\n");
        assert!(matches!(parse_settings(&doc), Err(Error::Invalid(_))));
    }

    #[test]
    fn negative_loss_cap_is_invalid() {
        let doc = format!("{MINIMAL}\n[risk]\nmax_daily_loss = -1.0\n");
        assert!(matches!(parse_settings(&doc), Err(Error::Invalid(_))));
    }

    #[test]
    fn missing_bot_section_fails_to_load() {
        assert!(matches!(parse_settings("[app]\nlog_level = \"debug\"\n"), Err(Error::LoadError(_))));
    }
}
