//! Hand-computed Supertrend fixtures and property tests over random series.

use core_types::{Kline, Side, Trend};
use proptest::prelude::*;
use strategies::supertrend::next_trend;
use strategies::{compute_atr, compute_supertrend, detect};

const EPS: f64 = 1e-9;

fn kline_around(close: f64, half_range: f64) -> Kline {
    Kline {
        open_time: 0,
        open: close,
        high: close + half_range,
        low: close - half_range,
        close,
        volume: 0.0,
        close_time: 0,
    }
}

fn klines_from_closes(closes: &[f64]) -> Vec<Kline> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Kline {
            open_time: i as i64 * 60_000,
            close_time: i as i64 * 60_000 + 59_999,
            ..kline_around(c, 0.5)
        })
        .collect()
}

fn assert_series(name: &str, actual: impl Iterator<Item = f64>, expected: &[f64]) {
    let actual: Vec<f64> = actual.collect();
    assert_eq!(actual.len(), expected.len(), "{name} length");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < EPS, "{name}[{i}]: {a} != {e}");
    }
}

#[test]
fn golden_five_bar_fixture() {
    let klines = klines_from_closes(&[10.0, 10.0, 12.0, 9.0, 13.0]);
    let atr = compute_atr(&klines, 2).unwrap();
    assert_series("atr", atr.iter().copied(), &[1.0, 1.0, 1.75, 3.0, 4.0]);

    let points = compute_supertrend(&klines, &atr, 1.0).unwrap();
    assert_series(
        "basic_upper",
        points.iter().map(|p| p.bands.basic_upper),
        &[11.0, 11.0, 13.75, 12.0, 17.0],
    );
    assert_series(
        "basic_lower",
        points.iter().map(|p| p.bands.basic_lower),
        &[9.0, 9.0, 10.25, 6.0, 9.0],
    );
    assert_series(
        "final_upper",
        points.iter().map(|p| p.bands.final_upper),
        &[11.0, 11.0, 11.0, 12.0, 12.0],
    );
    assert_series(
        "final_lower",
        points.iter().map(|p| p.bands.final_lower),
        &[9.0, 9.0, 10.25, 10.25, 9.0],
    );
    assert_series(
        "value",
        points.iter().map(|p| p.value),
        &[11.0, 11.0, 10.25, 12.0, 9.0],
    );

    let trends: Vec<Trend> = points.iter().map(|p| p.trend).collect();
    assert_eq!(
        trends,
        vec![Trend::Down, Trend::Down, Trend::Up, Trend::Down, Trend::Up]
    );
}

#[test]
fn reversal_scenario_emits_buy_then_sell() {
    let klines = klines_from_closes(&[10.0, 10.0, 12.0, 9.0, 13.0]);
    let atr = compute_atr(&klines, 2).unwrap();
    let points = compute_supertrend(&klines, &atr, 1.0).unwrap();

    let mut last_emitted = None;
    let mut emitted = Vec::new();
    for (i, pair) in points.windows(2).enumerate() {
        if let Some(side) = detect(pair[0].trend, pair[1].trend, last_emitted) {
            last_emitted = Some(side);
            emitted.push((i + 1, side));
        }
    }

    assert_eq!(emitted[0], (2, Side::Buy));
    assert_eq!(emitted[1], (3, Side::Sell));
}

#[test]
fn flat_series_never_flips() {
    let klines = klines_from_closes(&[10.0; 20]);
    let points = strategies::SuperTrend::new(strategies::SuperTrendSettings {
        atr_period: 5,
        multiplier: 3.0,
    })
    .unwrap()
    .evaluate(&klines)
    .unwrap();
    assert!(points.iter().all(|p| p.trend == Trend::Down));
}

fn arb_series() -> impl Strategy<Value = Vec<Kline>> {
    prop::collection::vec((1.0..1000.0_f64, 0.0..20.0_f64), 2..80).prop_map(|bars| {
        bars.into_iter()
            .map(|(close, half_range)| kline_around(close, half_range))
            .collect()
    })
}

fn arb_trend() -> impl Strategy<Value = Trend> {
    prop_oneof![Just(Trend::Up), Just(Trend::Down)]
}

proptest! {
    /// Each trend is determined by the prior trend, the close and the final bands alone.
    #[test]
    fn trend_is_a_function_of_close_and_final_bands(
        klines in arb_series(),
        window in 1usize..15,
        multiplier in 0.5..5.0_f64,
    ) {
        let atr = compute_atr(&klines, window).unwrap();
        let points = compute_supertrend(&klines, &atr, multiplier).unwrap();
        prop_assert_eq!(points.len(), klines.len());
        prop_assert_eq!(points[0].trend, Trend::Down);
        for i in 1..points.len() {
            let expected = next_trend(
                points[i - 1].trend,
                klines[i].close,
                points[i].bands.final_upper,
                points[i].bands.final_lower,
            );
            prop_assert_eq!(points[i].trend, expected);
            let value = match points[i].trend {
                Trend::Up => points[i].bands.final_lower,
                Trend::Down => points[i].bands.final_upper,
            };
            prop_assert_eq!(points[i].value, value);
        }
    }

    /// Final bands only move against the trend after price closed through them.
    #[test]
    fn final_bands_are_sticky(
        klines in arb_series(),
        window in 1usize..15,
        multiplier in 0.5..5.0_f64,
    ) {
        let atr = compute_atr(&klines, window).unwrap();
        let points = compute_supertrend(&klines, &atr, multiplier).unwrap();
        for i in 1..points.len() {
            let prev = points[i - 1].bands;
            let curr = points[i].bands;
            let prev_close = klines[i - 1].close;
            if !(prev_close > prev.final_upper) {
                prop_assert!(curr.final_upper <= prev.final_upper);
            }
            if !(prev_close < prev.final_lower) {
                prop_assert!(curr.final_lower >= prev.final_lower);
            }
        }
    }

    /// The detector never repeats a side without the opposite side in between.
    #[test]
    fn detector_alternates_sides(trends in prop::collection::vec(arb_trend(), 2..200)) {
        let mut last_emitted: Option<Side> = None;
        for pair in trends.windows(2) {
            if let Some(side) = detect(pair[0], pair[1], last_emitted) {
                prop_assert_ne!(Some(side), last_emitted);
                last_emitted = Some(side);
            }
        }
    }

    /// Re-evaluating the same transition right after it fired yields nothing.
    #[test]
    fn detector_suppresses_repeated_polls(prev in arb_trend(), curr in arb_trend()) {
        if let Some(side) = detect(prev, curr, None) {
            prop_assert_eq!(detect(prev, curr, Some(side)), None);
        }
    }
}
