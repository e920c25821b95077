//! System-backed settable wall clock.

use crate::{
    Result,
    traits::{Clock, SettableClock},
};
use chrono::{DateTime, Local, TimeDelta};
use std::sync::{Arc, RwLock};

/// Wall clock backed by the host system time plus a settable offset.
///
/// Setting the time adjusts the offset rather than the host clock, so no
/// privileges are needed and the host stays untouched. The offset lives
/// behind a shared handle: clones of a `SystemClock` observe the same time
/// base, which is how the serial console's set-time command becomes visible
/// to the door controller.
///
/// # Examples
///
/// ```
/// use vigia_hardware::{Clock, SettableClock, SystemClock};
/// use chrono::{Duration, Local};
///
/// let mut clock = SystemClock::new();
/// let observer = clock.clone();
///
/// clock.set(Local::now() + Duration::hours(2)).unwrap();
/// let skew = observer.now() - Local::now();
/// assert!(skew > Duration::minutes(119));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SystemClock {
    offset: Arc<RwLock<TimeDelta>>,
}

impl SystemClock {
    /// Create a clock reporting the unadjusted system time.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        // A poisoned lock means a writer panicked mid-set; the offset value
        // itself is always a valid delta, so keep serving it.
        let offset = self
            .offset
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Local::now() + *offset
    }
}

impl SettableClock for SystemClock {
    fn set(&mut self, to: DateTime<Local>) -> Result<()> {
        let mut offset = self
            .offset
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *offset = to - Local::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_unadjusted_clock_tracks_system_time() {
        let clock = SystemClock::new();
        let skew = clock.now() - Local::now();
        assert!(skew.abs() < Duration::seconds(1));
    }

    #[test]
    fn test_set_shifts_reported_time() {
        let mut clock = SystemClock::new();
        clock.set(Local::now() - Duration::hours(3)).unwrap();

        let skew = Local::now() - clock.now();
        assert!(skew > Duration::minutes(179));
        assert!(skew < Duration::minutes(181));
    }

    #[test]
    fn test_clones_share_the_time_base() {
        let mut clock = SystemClock::new();
        let observer = clock.clone();

        clock.set(Local::now() + Duration::days(1)).unwrap();

        let skew = observer.now() - Local::now();
        assert!(skew > Duration::hours(23));
    }
}
