//! Time management for the measurement loop
//!
//! Provides a clock abstraction so the sampling windows can run against
//! different time sources:
//! - Hardware timer (on target)
//! - Host monotonic clock (simulation, `std` builds)
//! - Scripted clock (tests)
//!
//! Sampling windows are specified as "sample until elapsed >= duration",
//! never as literal spinning, so an implementation is free to sleep, spin
//! or wait on a timer inside [`Clock::delay_us`].

/// Timestamp in milliseconds since device boot (monotonic).
pub type Timestamp = u64;

/// Monotonic clock with microsecond reads and a bounded delay primitive.
pub trait Clock {
    /// Current monotonic time in microseconds.
    fn now_us(&mut self) -> u64;

    /// Block for at least `us` microseconds.
    fn delay_us(&mut self, us: u32);

    /// Current monotonic time in milliseconds.
    fn now_ms(&mut self) -> Timestamp {
        self.now_us() / 1_000
    }
}

/// Host clock backed by `std::time::Instant` (requires `std`).
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct SystemClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// Create a clock whose zero point is "now".
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now_us(&mut self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(std::time::Duration::from_micros(us as u64));
    }
}

/// Scripted clock for tests and host simulation.
///
/// Every `now_us()` read advances the clock by a configurable step so
/// busy-sampling loops terminate deterministically, and `delay_us`
/// advances it by the requested delay. The step defaults to one
/// microsecond per read.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now_us: u64,
    step_us: u64,
}

impl FixedClock {
    /// Create a clock starting at zero with a 1 us per-read step.
    pub fn new() -> Self {
        Self {
            now_us: 0,
            step_us: 1,
        }
    }

    /// Set the amount the clock advances on every `now_us()` read.
    pub fn with_step_us(mut self, step_us: u64) -> Self {
        self.step_us = step_us;
        self
    }

    /// Advance the clock manually by `us` microseconds.
    pub fn advance_us(&mut self, us: u64) {
        self.now_us += us;
    }

    /// Advance the clock manually by `ms` milliseconds.
    pub fn advance_ms(&mut self, ms: u64) {
        self.now_us += ms * 1_000;
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FixedClock {
    fn now_us(&mut self) -> u64 {
        let now = self.now_us;
        self.now_us += self.step_us;
        now
    }

    fn delay_us(&mut self, us: u32) {
        self.now_us += us as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_steps_on_read() {
        let mut clock = FixedClock::new().with_step_us(10);
        assert_eq!(clock.now_us(), 0);
        assert_eq!(clock.now_us(), 10);

        clock.advance_us(100);
        assert_eq!(clock.now_us(), 120);
    }

    #[test]
    fn fixed_clock_delay_advances() {
        let mut clock = FixedClock::new().with_step_us(0);
        clock.delay_us(250);
        assert_eq!(clock.now_us(), 250);
    }

    #[test]
    fn ms_reads_derive_from_us() {
        let mut clock = FixedClock::new().with_step_us(0);
        clock.advance_ms(42);
        assert_eq!(clock.now_ms(), 42);
    }
}
