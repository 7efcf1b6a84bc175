// In crates/notifier/src/events.rs

use core_types::{Side, Symbol};
use rust_decimal::Decimal;
use std::fmt;

/// Everything the bot reports to a human.
#[derive(Debug, Clone, PartialEq)]
pub enum BotEvent {
    Started { symbol: Symbol, sink: &'static str },
    OrderPlaced {
        symbol: Symbol,
        side: Side,
        volume: Decimal,
        stop_loss: Decimal,
        take_profit: Decimal,
    },
    OrderFailed { symbol: Symbol, side: Side, reason_code: String },
    DailyLossLimit { pnl: Decimal },
    TradeCapReached { trades: u32 },
    CycleError { message: String },
}

impl fmt::Display for BotEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotEvent::Started { symbol, sink } => {
                write!(f, "Supertrend bot started for symbol: {symbol} ({sink})")
            }
            BotEvent::OrderPlaced { symbol, side, volume, stop_loss, take_profit } => write!(
                f,
                "Placed {side} order: {symbol} vol={volume} sl={stop_loss} tp={take_profit}"
            ),
            BotEvent::OrderFailed { symbol, side, reason_code } => {
                write!(f, "Order failed: {side} {symbol} ({reason_code})")
            }
            BotEvent::DailyLossLimit { pnl } => {
                write!(f, "Daily loss limit reached: {pnl}. Stopping trading for today.")
            }
            BotEvent::TradeCapReached { trades } => {
                write!(f, "Max trades per day reached: {trades}. Stopping trading for today.")
            }
            BotEvent::CycleError { message } => write!(f, "Bot error: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn renders_order_placed() {
        let event = BotEvent::OrderPlaced {
            symbol: Symbol("EURUSD".into()),
            side: Side::Buy,
            volume: dec!(0.01),
            stop_loss: dec!(1.0812),
            take_profit: dec!(1.0920),
        };
        assert_eq!(
            event.to_string(),
            "Placed BUY order: EURUSD vol=0.01 sl=1.0812 tp=1.0920"
        );
    }

    #[test]
    fn renders_loss_limit() {
        let event = BotEvent::DailyLossLimit { pnl: dec!(-100.5) };
        assert!(event.to_string().starts_with("Daily loss limit reached: -100.5"));
    }
}
