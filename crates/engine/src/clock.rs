// In crates/engine/src/clock.rs

use chrono::{Local, NaiveDate};

/// The source of the current trading date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The local calendar date of the machine the bot runs on.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
