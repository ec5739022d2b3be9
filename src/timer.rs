use std::time::{Duration, Instant};

/// A fixed-interval schedule, polled by the host's event loop.
///
/// Ticks are due at `start + k * interval`, independent of when they are polled.
/// Ticks missed in between polls are coalesced into one.
#[derive(Clone, Debug)]
pub struct RefreshTimer {
    interval: Duration,
    next_due: Instant,
    cancelled: bool,
}

impl RefreshTimer {
    /// Starts a schedule whose first tick is due one interval after `start`.
    #[must_use]
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            next_due: start + interval,
            cancelled: false,
        }
    }

    /// The refresh interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the next tick is due.
    #[must_use]
    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Returns `true` if a tick is due at `now`, advancing the schedule.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.cancelled || now < self.next_due {
            return false;
        }

        let behind = now.duration_since(self.next_due).as_nanos();
        let skipped = behind.checked_div(self.interval.as_nanos()).unwrap_or(0);

        if skipped > 0 {
            log::trace!("coalescing {skipped} missed ticks");
        }

        let ticks = u32::try_from(skipped + 1).unwrap_or(u32::MAX);
        self.next_due += self.interval.saturating_mul(ticks);

        // NOTE: A zero interval would never move forward
        if self.next_due <= now {
            self.next_due = now + self.interval.max(Duration::from_nanos(1));
        }

        true
    }

    /// Stops the schedule, no tick will be due anymore.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Returns `true` if the schedule was stopped.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn timer_not_due_before_interval() {
        let start = Instant::now();
        let mut timer = RefreshTimer::new(INTERVAL, start);

        assert!(!timer.poll(start));
        assert!(!timer.poll(start + Duration::from_millis(99)));
        assert!(timer.poll(start + INTERVAL));
        assert!(!timer.poll(start + INTERVAL));
    }

    #[test]
    fn timer_keeps_phase() {
        let start = Instant::now();
        let mut timer = RefreshTimer::new(INTERVAL, start);

        assert!(timer.poll(start + Duration::from_millis(130)));
        assert_eq!(start + Duration::from_millis(200), timer.next_due());
    }

    #[test]
    fn timer_coalesces_missed_ticks() {
        let start = Instant::now();
        let mut timer = RefreshTimer::new(INTERVAL, start);

        assert!(timer.poll(start + Duration::from_millis(550)));
        assert!(!timer.poll(start + Duration::from_millis(560)));
        assert_eq!(start + Duration::from_millis(600), timer.next_due());
    }

    #[test]
    fn timer_cancel() {
        let start = Instant::now();
        let mut timer = RefreshTimer::new(INTERVAL, start);

        timer.cancel();

        assert!(timer.is_cancelled());
        assert!(!timer.poll(start + INTERVAL * 3));
    }
}
