// In crates/engine/src/lib.rs

pub mod clock;
pub mod decision_loop;
pub mod error;

pub use clock::{Clock, SystemClock};
pub use decision_loop::{observe, CycleOutcome, DecisionLoop, LoopConfig, MarketView};
pub use error::{Error, Result};
