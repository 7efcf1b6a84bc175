// In crates/risk/src/lib.rs

pub mod error;
pub mod guard;
pub mod levels;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use guard::{DailyStats, RiskGuard, RiskState};
pub use levels::Decision;
pub use types::RiskSettings;
