// In app/src/main.rs

use anyhow::{Context, Result};
use api_client::ApiClient;
use app_config::Settings;
use clap::{Parser, Subcommand};
use core_types::Symbol;
use engine::{observe, Clock, DecisionLoop, LoopConfig, SystemClock};
use execution::{LiveExecutor, OrderSink, PaperExecutor};
use notifier::{LogNotifier, Notifier, TelegramNotifier};
use risk::RiskGuard;
use strategies::{detect, SuperTrend};
use tracing_subscriber::prelude::*;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "A Supertrend trading bot for Binance Futures.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs the decision loop until Ctrl-C, in paper or live mode.
    Run,

    /// Prints the current Supertrend state of a symbol without trading.
    Scan {
        /// The trading symbol to scan (defaults to `bot.symbol`).
        #[arg(short, long)]
        symbol: Option<String>,

        /// The kline interval (defaults to `bot.timeframe`).
        #[arg(short, long)]
        interval: Option<String>,
    },
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings().context("Failed to load settings")?;
    init_tracing(&settings.app.log_level);
    tracing::info!("Starting Supertrend bot");

    match cli.command {
        Commands::Run => run_bot(settings).await?,
        Commands::Scan { symbol, interval } => handle_scan(settings, symbol, interval).await?,
    }

    tracing::info!("Supertrend bot has finished successfully.");
    Ok(())
}

fn init_tracing(log_level: &str) {
    let level = log_level.parse().unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(
        tracing_subscriber::filter::Targets::new()
            .with_target("reqwest", tracing::Level::WARN)
            .with_target("hyper", tracing::Level::WARN)
            .with_default(level),
    );
    tracing_subscriber::registry().with(fmt_layer).init();
}

// --- "Run" Subcommand Logic ---

/// Wires every collaborator and runs the decision loop until Ctrl-C.
async fn run_bot(settings: Settings) -> Result<()> {
    // --- 1. Components ---
    let api_client = api_client::new(&settings.binance)?;
    let indicator = SuperTrend::new(settings.strategy.clone())?;
    let clock = SystemClock;
    let risk_guard = RiskGuard::new(settings.risk.clone(), clock.today())?;

    // Conditionally instantiate the executor based on the config flag
    let sink: Box<dyn OrderSink + Send + Sync> = if settings.app.live_trading_enabled {
        tracing::warn!("LIVE TRADING IS ENABLED. REAL ORDERS WILL BE PLACED.");
        Box::new(LiveExecutor::new(api_client.clone()))
    } else {
        Box::new(PaperExecutor::new())
    };

    let notifier: Box<dyn Notifier + Send + Sync> = match settings.telegram.as_ref() {
        Some(telegram) => Box::new(TelegramNotifier::new(telegram)?),
        None => Box::new(LogNotifier),
    };
    tracing::info!(notifier = notifier.name(), "Notifier ready.");

    // --- 2. The Loop ---
    let mut decision_loop = DecisionLoop::new(
        LoopConfig::from_settings(&settings.bot),
        indicator,
        risk_guard,
        Box::new(api_client),
        sink,
        notifier,
        Box::new(clock),
    );

    decision_loop.run(shutdown_signal()).await;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Ctrl-C received. Stopping after the current cycle."),
        Err(e) => {
            // Without a signal handler the loop can only be killed.
            tracing::error!(error = %e, "Failed to listen for Ctrl-C.");
            std::future::pending::<()>().await;
        }
    }
}

// --- "Scan" Subcommand Logic ---

/// Fetches completed klines once and prints what the loop would see.
async fn handle_scan(settings: Settings, symbol: Option<String>, interval: Option<String>) -> Result<()> {
    let api_client: ApiClient = api_client::new(&settings.binance)?;
    let indicator = SuperTrend::new(settings.strategy.clone())?;
    let symbol = Symbol(symbol.unwrap_or_else(|| settings.bot.symbol.clone()));
    let interval = interval.unwrap_or_else(|| settings.bot.timeframe.clone());

    tracing::info!(%symbol, %interval, "Scanning.");
    let view = observe(&api_client, &indicator, &symbol, &interval, settings.bot.kline_count).await?;
    let signal = detect(view.prev.trend, view.curr.trend, None);

    println!("\n--- Supertrend Scan: {} {} ---", symbol, interval);
    println!("  - Close: {:.5} | ATR: {:.5}", view.kline.close, view.curr.atr);
    println!(
        "  - Trend: {:?} (previous {:?}) | Supertrend: {:.5}",
        view.curr.trend, view.prev.trend, view.curr.value
    );
    println!(
        "  - Final bands: upper {:.5} | lower {:.5}",
        view.curr.bands.final_upper, view.curr.bands.final_lower
    );
    match signal {
        Some(side) => println!("  - Signal on the last bar: {}", side),
        None => println!("  - Signal on the last bar: none"),
    }
    Ok(())
}
