// In crates/strategies/src/lib.rs

pub mod atr;
pub mod error;
pub mod signal;
pub mod supertrend;
pub mod types;

// Re-export public types
pub use atr::compute_atr;
pub use error::{Error, Result};
pub use signal::detect;
pub use supertrend::{compute_supertrend, BandState, SuperTrend, SupertrendPoint};
pub use types::SuperTrendSettings;
