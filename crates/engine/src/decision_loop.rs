// In crates/engine/src/decision_loop.rs

use crate::clock::Clock;
use crate::{Error, Result};
use api_client::CandleSource;
use app_config::types::BotSettings;
use core_types::{Kline, OrderAck, Side, Symbol, Trend};
use execution::OrderSink;
use notifier::{BotEvent, Notifier};
use risk::{Decision, RiskGuard, RiskState};
use rust_decimal::Decimal;
use std::future::Future;
use std::time::Duration;
use strategies::{detect, SuperTrend, SupertrendPoint};

/// The per-instance knobs of the loop, taken from `[bot]`.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub symbol: Symbol,
    pub timeframe: String,
    pub kline_count: usize,
    pub volume: Decimal,
    pub price_precision: u32,
    pub poll_interval: Duration,
    pub halted_backoff: Duration,
    pub error_backoff: Duration,
}

impl LoopConfig {
    pub fn from_settings(bot: &BotSettings) -> Self {
        Self {
            symbol: Symbol(bot.symbol.clone()),
            timeframe: bot.timeframe.clone(),
            kline_count: bot.kline_count,
            volume: bot.volume,
            price_precision: bot.price_precision,
            poll_interval: Duration::from_secs(bot.poll_interval_secs),
            halted_backoff: Duration::from_secs(bot.halted_backoff_secs),
            error_backoff: Duration::from_secs(bot.error_backoff_secs),
        }
    }
}

/// The indicator state of the two most recent completed bars.
#[derive(Debug, Clone, Copy)]
pub struct MarketView {
    pub kline: Kline,
    pub prev: SupertrendPoint,
    pub curr: SupertrendPoint,
}

/// How a successful cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// The risk guard refused to trade; nothing was fetched.
    Halted(RiskState),
    /// No new flip on the latest bar.
    NoSignal { trend: Trend },
    OrderPlaced { decision: Decision, ack: OrderAck },
    /// The sink refused the order. The risk guard was not updated.
    OrderRejected { decision: Decision, ack: OrderAck },
}

/// Fetches completed klines and runs the indicator over them.
pub async fn observe(
    candles: &(dyn CandleSource + Send + Sync),
    indicator: &SuperTrend,
    symbol: &Symbol,
    timeframe: &str,
    count: usize,
) -> Result<MarketView> {
    let klines = candles.fetch_recent(symbol, timeframe, count).await?;
    validate_klines(&klines)?;

    let points = indicator.evaluate(&klines)?;
    match (klines.last(), points.as_slice()) {
        (Some(kline), [.., prev, curr]) => Ok(MarketView { kline: *kline, prev: *prev, curr: *curr }),
        _ => Err(Error::InsufficientData { required: 2, actual: klines.len() }),
    }
}

/// Rejects series the indicator must not see: non-finite prices or bars out of order.
fn validate_klines(klines: &[Kline]) -> Result<()> {
    if klines.is_empty() {
        return Err(Error::DataUnavailable("candle source returned no klines".into()));
    }
    if let Some(bad) = klines.iter().find(|k| !k.is_well_formed()) {
        return Err(Error::DataUnavailable(format!("malformed kline at {}", bad.open_time)));
    }
    if let Some(pair) = klines.windows(2).find(|w| w[1].open_time <= w[0].open_time) {
        return Err(Error::DataUnavailable(format!(
            "klines out of order at {} -> {}",
            pair[0].open_time, pair[1].open_time
        )));
    }
    Ok(())
}

/// The single sequential trading loop.
///
/// Owns every piece of mutable state (the risk guard and the last emitted
/// side), so each cycle observes a consistent view without locking.
pub struct DecisionLoop {
    config: LoopConfig,
    indicator: SuperTrend,
    risk_guard: RiskGuard,
    candles: Box<dyn CandleSource + Send + Sync>,
    sink: Box<dyn OrderSink + Send + Sync>,
    notifier: Box<dyn Notifier + Send + Sync>,
    clock: Box<dyn Clock + Send + Sync>,
    last_emitted: Option<Side>,
    halt_reported: bool,
}

impl DecisionLoop {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: LoopConfig,
        indicator: SuperTrend,
        risk_guard: RiskGuard,
        candles: Box<dyn CandleSource + Send + Sync>,
        sink: Box<dyn OrderSink + Send + Sync>,
        notifier: Box<dyn Notifier + Send + Sync>,
        clock: Box<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            config,
            indicator,
            risk_guard,
            candles,
            sink,
            notifier,
            clock,
            last_emitted: None,
            halt_reported: false,
        }
    }

    pub fn risk_guard(&self) -> &RiskGuard {
        &self.risk_guard
    }

    pub fn last_emitted(&self) -> Option<Side> {
        self.last_emitted
    }

    /// Books realized PnL from an external settlement feed into today's stats.
    pub fn record_settlement(&mut self, realized_pnl: Decimal) {
        self.risk_guard.evaluate(self.clock.today());
        self.risk_guard.record_settlement(realized_pnl);
        tracing::info!(
            %realized_pnl,
            cumulative_pnl = %self.risk_guard.stats().cumulative_pnl,
            "Settlement recorded."
        );
    }

    /// Runs one complete cycle: risk gate, data, indicator, signal, order.
    ///
    /// The risk guard is only mutated after the sink accepted an order, and
    /// before that order is announced.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome> {
        // --- 1. Risk Gate (with lazy day rollover) ---
        let today = self.clock.today();
        let (state, rolled_over) = self.risk_guard.evaluate(today);
        if rolled_over {
            tracing::info!(%today, "New trading day. Daily stats reset.");
        }
        if state != RiskState::Active {
            self.report_halt(state).await;
            return Ok(CycleOutcome::Halted(state));
        }
        self.halt_reported = false;

        // --- 2. Data & Indicator ---
        let view = observe(
            self.candles.as_ref(),
            &self.indicator,
            &self.config.symbol,
            &self.config.timeframe,
            self.config.kline_count,
        )
        .await?;

        // --- 3. Signal Detection ---
        let Some(side) = detect(view.prev.trend, view.curr.trend, self.last_emitted) else {
            tracing::debug!(trend = ?view.curr.trend, supertrend = view.curr.value, "No new signal.");
            return Ok(CycleOutcome::NoSignal { trend: view.curr.trend });
        };
        self.last_emitted = Some(side);
        tracing::info!(
            symbol = %self.config.symbol,
            ?side,
            close = view.kline.close,
            atr = view.curr.atr,
            supertrend = view.curr.value,
            "Supertrend flip detected."
        );

        // --- 4. Protective Levels ---
        let decision = Decision::for_signal(
            side,
            view.kline.close,
            view.curr.atr,
            self.config.volume,
            self.risk_guard.settings(),
            self.config.price_precision,
        )?;
        let order_request = decision.to_order_request(&self.config.symbol);

        // --- 5. Execution ---
        let ack = self.sink.submit(&order_request).await?;
        if !ack.accepted {
            tracing::warn!(reason_code = %ack.reason_code, ?decision, "Order rejected.");
            self.notify(BotEvent::OrderFailed {
                symbol: self.config.symbol.clone(),
                side,
                reason_code: ack.reason_code.clone(),
            })
            .await;
            return Ok(CycleOutcome::OrderRejected { decision, ack });
        }

        tracing::info!(reason_code = %ack.reason_code, ?decision, sink = self.sink.name(), "Order accepted.");

        // --- 6. Book the Trade ---
        // PnL is unknown at entry; realized PnL arrives through `record_settlement`.
        self.risk_guard.record_trade(Decimal::ZERO);

        self.notify(BotEvent::OrderPlaced {
            symbol: self.config.symbol.clone(),
            side,
            volume: decision.volume,
            stop_loss: decision.stop_loss,
            take_profit: decision.take_profit,
        })
        .await;

        Ok(CycleOutcome::OrderPlaced { decision, ack })
    }

    /// How long to sleep after a cycle, reporting failures on the way.
    async fn settle(&self, result: Result<CycleOutcome>) -> Duration {
        match result {
            Ok(CycleOutcome::Halted(_)) => self.config.halted_backoff,
            Ok(_) => self.config.poll_interval,
            Err(e) if e.is_data_gap() => {
                tracing::warn!(error = %e, "Cycle skipped: no usable market data.");
                self.config.error_backoff
            }
            Err(e) => {
                tracing::error!(error = %e, "Error in decision cycle.");
                self.notify(BotEvent::CycleError { message: e.to_string() }).await;
                self.config.error_backoff
            }
        }
    }

    /// Runs cycles until `shutdown` resolves.
    ///
    /// Shutdown is only observed while sleeping between cycles, so a cycle is
    /// never interrupted halfway.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tracing::info!(
            symbol = %self.config.symbol,
            timeframe = %self.config.timeframe,
            sink = self.sink.name(),
            source = self.candles.name(),
            "Starting decision loop."
        );
        self.notify(BotEvent::Started { symbol: self.config.symbol.clone(), sink: self.sink.name() })
            .await;

        tokio::pin!(shutdown);
        loop {
            let result = self.run_cycle().await;
            let pause = self.settle(result).await;

            tokio::select! {
                _ = tokio::time::sleep(pause) => {}
                _ = &mut shutdown => break,
            }
        }

        tracing::info!(symbol = %self.config.symbol, "Decision loop stopped.");
    }

    /// Notifies once per halt, not on every halted cycle.
    async fn report_halt(&mut self, state: RiskState) {
        if self.halt_reported {
            return;
        }
        self.halt_reported = true;

        let stats = self.risk_guard.stats().clone();
        let event = match state {
            RiskState::LossHalted => BotEvent::DailyLossLimit { pnl: stats.cumulative_pnl },
            RiskState::CapHalted => BotEvent::TradeCapReached { trades: stats.trade_count },
            RiskState::Active => return,
        };
        tracing::warn!(?state, trades = stats.trade_count, pnl = %stats.cumulative_pnl, "Trading halted for today.");
        self.notify(event).await;
    }

    async fn notify(&self, event: BotEvent) {
        self.notifier.notify(&event.to_string()).await;
    }
}
