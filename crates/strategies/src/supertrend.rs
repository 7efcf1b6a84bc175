// In crates/strategies/src/supertrend.rs

use crate::types::SuperTrendSettings;
use crate::{compute_atr, Error, Result};
use core_types::{Kline, Trend};

/// Minimum number of klines needed to observe a trend transition.
pub const MIN_KLINES: usize = 2;

/// The four band prices of a single bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandState {
    pub basic_upper: f64,
    pub basic_lower: f64,
    pub final_upper: f64,
    pub final_lower: f64,
}

/// The indicator output for a single bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupertrendPoint {
    pub trend: Trend,
    /// The active trailing band: `final_lower` in an uptrend, `final_upper` otherwise.
    pub value: f64,
    pub atr: f64,
    pub bands: BandState,
}

impl SupertrendPoint {
    fn seed(kline: &Kline, atr: f64, multiplier: f64) -> Self {
        let (basic_upper, basic_lower) = basic_bands(kline, atr, multiplier);
        Self {
            trend: Trend::Down,
            value: basic_upper,
            atr,
            bands: BandState {
                basic_upper,
                basic_lower,
                final_upper: basic_upper,
                final_lower: basic_lower,
            },
        }
    }

    /// Advances the indicator by one bar. `prev_close` is the close of the bar
    /// that produced `self`.
    fn next(&self, prev_close: f64, kline: &Kline, atr: f64, multiplier: f64) -> Self {
        let prev = &self.bands;
        let (basic_upper, basic_lower) = basic_bands(kline, atr, multiplier);

        // A band only moves against the trend when price has closed through it.
        let final_upper = if basic_upper < prev.final_upper || prev_close > prev.final_upper {
            basic_upper
        } else {
            prev.final_upper
        };
        let final_lower = if basic_lower > prev.final_lower || prev_close < prev.final_lower {
            basic_lower
        } else {
            prev.final_lower
        };

        let trend = next_trend(self.trend, kline.close, final_upper, final_lower);
        let value = match trend {
            Trend::Up => final_lower,
            Trend::Down => final_upper,
        };

        Self {
            trend,
            value,
            atr,
            bands: BandState { basic_upper, basic_lower, final_upper, final_lower },
        }
    }
}

fn basic_bands(kline: &Kline, atr: f64, multiplier: f64) -> (f64, f64) {
    let hl2 = (kline.high + kline.low) / 2.0;
    (hl2 + multiplier * atr, hl2 - multiplier * atr)
}

/// The trend of a bar given the previous bar's trend and this bar's close and
/// final bands. Only a strict cross flips the trend.
pub fn next_trend(prev: Trend, close: f64, final_upper: f64, final_lower: f64) -> Trend {
    match prev {
        Trend::Down if close > final_upper => Trend::Up,
        Trend::Up if close < final_lower => Trend::Down,
        unchanged => unchanged,
    }
}

/// Computes the Supertrend series over `klines` using a precomputed ATR series.
///
/// The band recurrence is path dependent, so this is a left-to-right fold where
/// every bar is derived from the previous one.
pub fn compute_supertrend(
    klines: &[Kline],
    atr: &[f64],
    multiplier: f64,
) -> Result<Vec<SupertrendPoint>> {
    if klines.len() < MIN_KLINES {
        return Err(Error::InsufficientData { required: MIN_KLINES, actual: klines.len() });
    }
    if atr.len() != klines.len() {
        return Err(Error::InsufficientData { required: klines.len(), actual: atr.len() });
    }

    let seed = vec![SupertrendPoint::seed(&klines[0], atr[0], multiplier)];
    let points = klines
        .windows(2)
        .zip(&atr[1..])
        .fold(seed, |mut points, (pair, &bar_atr)| {
            // `points` is never empty: it starts with the seed.
            let last = points[points.len() - 1];
            points.push(last.next(pair[0].close, &pair[1], bar_atr, multiplier));
            points
        });

    Ok(points)
}

/// A configured Supertrend indicator.
#[derive(Debug, Clone)]
pub struct SuperTrend {
    settings: SuperTrendSettings,
}

impl SuperTrend {
    /// Creates a new `SuperTrend` from its settings, validating them.
    pub fn new(settings: SuperTrendSettings) -> Result<Self> {
        if settings.atr_period < 1 {
            return Err(Error::InvalidParameters("ATR period must be greater than 0".into()));
        }
        if settings.multiplier.is_nan() || settings.multiplier <= 0.0 {
            return Err(Error::InvalidParameters("Supertrend multiplier must be positive".into()));
        }
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &SuperTrendSettings {
        &self.settings
    }

    /// Computes ATR and Supertrend over `klines` in one pass.
    pub fn evaluate(&self, klines: &[Kline]) -> Result<Vec<SupertrendPoint>> {
        let atr = compute_atr(klines, self.settings.atr_period as usize)?;
        compute_supertrend(klines, &atr, self.settings.multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kline(close: f64) -> Kline {
        Kline {
            open_time: 0,
            open: close,
            high: close + 0.5,
            low: close - 0.5,
            close,
            volume: 0.0,
            close_time: 0,
        }
    }

    #[test]
    fn single_kline_is_insufficient() {
        let err = compute_supertrend(&[kline(10.0)], &[1.0], 1.0).unwrap_err();
        assert_eq!(err, Error::InsufficientData { required: 2, actual: 1 });
    }

    #[test]
    fn misaligned_atr_is_rejected() {
        let err = compute_supertrend(&[kline(10.0), kline(11.0)], &[1.0], 1.0).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { .. }));
    }

    #[test]
    fn seed_bar_is_down_on_the_upper_band() {
        let points = compute_supertrend(&[kline(10.0), kline(10.0)], &[1.0, 1.0], 2.0).unwrap();
        assert_eq!(points[0].trend, Trend::Down);
        assert_eq!(points[0].value, 12.0);
        assert_eq!(points[0].bands.final_lower, 8.0);
    }

    #[test]
    fn close_on_the_band_does_not_flip() {
        assert_eq!(next_trend(Trend::Down, 11.0, 11.0, 9.0), Trend::Down);
        assert_eq!(next_trend(Trend::Up, 9.0, 11.0, 9.0), Trend::Up);
        assert_eq!(next_trend(Trend::Down, 11.01, 11.0, 9.0), Trend::Up);
        assert_eq!(next_trend(Trend::Up, 8.99, 11.0, 9.0), Trend::Down);
    }

    #[test]
    fn upper_band_sticks_until_price_closes_above_it() {
        // Widening volatility pushes the basic band up, the final band holds.
        let klines = [kline(10.0), kline(10.0), kline(10.0)];
        let points = compute_supertrend(&klines, &[1.0, 2.0, 3.0], 1.0).unwrap();
        assert_eq!(points[1].bands.basic_upper, 12.0);
        assert_eq!(points[1].bands.final_upper, 11.0);
        assert_eq!(points[2].bands.final_upper, 11.0);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let zero_period = SuperTrendSettings { atr_period: 0, multiplier: 3.0 };
        assert!(SuperTrend::new(zero_period).is_err());
        let bad_multiplier = SuperTrendSettings { atr_period: 10, multiplier: 0.0 };
        assert!(SuperTrend::new(bad_multiplier).is_err());
    }
}
