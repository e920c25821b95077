//! Mock wall clock with a fixed, controllable time.

use crate::{
    Result,
    traits::{Clock, SettableClock},
};
use chrono::{DateTime, Local, TimeDelta, TimeZone};
use std::sync::{Arc, Mutex};

/// Mock clock reporting a fixed, controllable time.
///
/// Clones share the same time base, matching the contract real clocks
/// follow so the console and door controller can hold the same clock.
///
/// # Examples
///
/// ```
/// use vigia_hardware::mock::MockClock;
/// use vigia_hardware::traits::Clock;
/// use chrono::Timelike;
///
/// let clock = MockClock::at_hour(10);
/// assert_eq!(clock.now().hour(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct MockClock {
    now: Arc<Mutex<DateTime<Local>>>,
}

impl MockClock {
    /// Create a clock frozen at the given time.
    #[must_use]
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Create a clock frozen at the given hour of an arbitrary day.
    ///
    /// Convenience for hour-window tests; minutes and seconds are zero.
    /// Hours above 23 are clamped to 23.
    #[must_use]
    pub fn at_hour(hour: u8) -> Self {
        let hour = hour.min(23);
        let now = Local
            .with_ymd_and_hms(2025, 6, 2, u32::from(hour), 0, 0)
            .single()
            .unwrap_or_else(Local::now);
        Self::new(now)
    }

    /// Move the clock forward (or backward, with a negative delta).
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self
            .now
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *now += delta;
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Local> {
        *self
            .now
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl SettableClock for MockClock {
    fn set(&mut self, to: DateTime<Local>) -> Result<()> {
        let mut now = self
            .now
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *now = to;
        Ok(())
    }
}
