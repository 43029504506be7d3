use std::thread;
use std::time::{Duration, Instant};

/// Source of time for pacing sends and measuring elapsed durations.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

/// Wall clock backed by `Instant` and a blocking `thread::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

/// Virtual clock that only advances when slept on.
#[cfg(test)]
#[derive(Clone, Debug)]
pub struct ManualClock {
    start: Instant,
    offset: Duration,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        ManualClock { start: Instant::now(), offset: Duration::ZERO }
    }

    pub fn elapsed(&self) -> Duration {
        self.offset
    }
}

#[cfg(test)]
impl Default for ManualClock {
    fn default() -> Self {
        ManualClock::new()
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + self.offset
    }

    fn sleep(&mut self, duration: Duration) {
        self.offset += duration;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn manual_clock_advances_only_on_sleep() {
        let mut clock = ManualClock::new();
        let t0 = clock.now();
        assert_eq!(clock.now(), t0);
        clock.sleep(Duration::from_millis(250));
        clock.sleep(Duration::from_millis(250));
        assert_eq!(clock.now() - t0, Duration::from_millis(500));
        assert_eq!(clock.elapsed(), Duration::from_millis(500));
        assert_eq!(ManualClock::default().elapsed(), Duration::ZERO);
    }

    #[test]
    fn system_clock_sleeps_at_least_requested() {
        let mut clock = SystemClock;
        let t0 = clock.now();
        clock.sleep(Duration::from_millis(5));
        assert!(clock.now() - t0 >= Duration::from_millis(5));
    }
}
