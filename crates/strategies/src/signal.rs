// In crates/strategies/src/signal.rs

use core_types::{Side, Trend};

/// Turns a trend transition between two consecutive bars into a trade side.
///
/// Returns `None` when the trend did not flip, or when the flip maps to the
/// side that was emitted last. The caller owns `last_emitted` and must update
/// it with every side this function returns.
pub fn detect(prev: Trend, curr: Trend, last_emitted: Option<Side>) -> Option<Side> {
    let side = match (prev, curr) {
        (Trend::Down, Trend::Up) => Side::Buy,
        (Trend::Up, Trend::Down) => Side::Sell,
        _ => return None,
    };

    (last_emitted != Some(side)).then_some(side)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_map_to_sides() {
        assert_eq!(detect(Trend::Down, Trend::Up, None), Some(Side::Buy));
        assert_eq!(detect(Trend::Up, Trend::Down, None), Some(Side::Sell));
    }

    #[test]
    fn no_flip_no_signal() {
        assert_eq!(detect(Trend::Up, Trend::Up, None), None);
        assert_eq!(detect(Trend::Down, Trend::Down, Some(Side::Sell)), None);
    }

    #[test]
    fn repeated_evaluation_of_the_same_flip_is_suppressed() {
        let first = detect(Trend::Down, Trend::Up, None);
        assert_eq!(first, Some(Side::Buy));
        assert_eq!(detect(Trend::Down, Trend::Up, first), None);
        assert_eq!(detect(Trend::Up, Trend::Down, first), Some(Side::Sell));
    }
}
