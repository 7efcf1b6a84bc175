// In crates/risk/src/levels.rs

use crate::types::RiskSettings;
use crate::{Error, Result};
use core_types::{OrderRequest, Side, Symbol};
use num_traits::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// A sized trade with its protective levels, built for one accepted signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub side: Side,
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
    pub volume: Decimal,
}

impl Decision {
    /// Derives stop-loss and take-profit from the signal bar's close and ATR.
    ///
    /// For a buy the stop sits `atr * risk_multiplier` below the close and the
    /// target `reward_multiplier` stop distances above it; a sell mirrors this.
    /// Both prices are rounded to `price_precision` decimals.
    pub fn for_signal(
        side: Side,
        close: f64,
        atr: f64,
        volume: Decimal,
        settings: &RiskSettings,
        price_precision: u32,
    ) -> Result<Self> {
        let (stop_loss, take_profit) = match side {
            Side::Buy => {
                let sl = close - atr * settings.risk_multiplier;
                (sl, close + (close - sl) * settings.reward_multiplier)
            }
            Side::Sell => {
                let sl = close + atr * settings.risk_multiplier;
                (sl, close - (sl - close) * settings.reward_multiplier)
            }
        };

        Ok(Self {
            side,
            stop_loss: to_price(stop_loss, price_precision)?,
            take_profit: to_price(take_profit, price_precision)?,
            volume,
        })
    }

    pub fn to_order_request(&self, symbol: &Symbol) -> OrderRequest {
        OrderRequest {
            symbol: symbol.clone(),
            side: self.side,
            volume: self.volume,
            stop_loss: self.stop_loss,
            take_profit: self.take_profit,
        }
    }
}

fn to_price(value: f64, precision: u32) -> Result<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(precision, RoundingStrategy::MidpointNearestEven))
        .ok_or_else(|| Error::InvalidLevels(format!("price {value} is not representable")))
}
