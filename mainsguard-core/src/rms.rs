//! Windowed RMS current measurement
//!
//! Samples the sensor for an integer number of mains cycles, converts
//! each sample to an instantaneous current and accumulates the squares,
//! then returns the root of the mean. The window is timed against the
//! microsecond clock: "sample until elapsed >= cycles / frequency". The
//! loop blocks for the whole window; there is no cancellation.
//!
//! Accumulation runs in double precision even though samples and results
//! are single precision, which keeps error growth over many squared
//! terms under control.

use crate::adc::{AdcConverter, AdcReader};
use crate::constants::{MAINS_FREQ_HZ, SAMPLE_DELAY_US};
use crate::time::Clock;

/// Cycle-windowed RMS engine.
#[derive(Debug, Clone, Copy)]
pub struct RmsEngine {
    converter: AdcConverter,
    mains_freq_hz: f32,
    sample_delay_us: u32,
}

impl RmsEngine {
    /// Create an engine for the standard mains frequency and sampling
    /// cadence.
    pub fn new(converter: AdcConverter) -> Self {
        Self {
            converter,
            mains_freq_hz: MAINS_FREQ_HZ,
            sample_delay_us: SAMPLE_DELAY_US,
        }
    }

    /// Override the mains frequency (50 Hz grids).
    pub fn with_mains_frequency(mut self, hz: f32) -> Self {
        self.mains_freq_hz = hz;
        self
    }

    /// Sampling window for `cycles` mains cycles, in microseconds.
    pub fn window_us(&self, cycles: u16) -> u64 {
        (cycles as f32 * 1_000_000.0 / self.mains_freq_hz) as u64
    }

    /// Measure RMS current over `cycles` mains cycles.
    ///
    /// Each sample has `center_volts` subtracted to recover the AC
    /// component and is divided by `effective_sensitivity` to become an
    /// instantaneous current in amps. A window that collects no samples
    /// returns `0.0` rather than dividing by zero.
    pub fn measure<A: AdcReader, C: Clock>(
        &self,
        cycles: u16,
        center_volts: f32,
        effective_sensitivity: f32,
        adc: &mut A,
        clock: &mut C,
    ) -> f32 {
        let duration_us = self.window_us(cycles);
        let start = clock.now_us();
        let mut acc_sq = 0.0f64;
        let mut samples = 0u32;

        while clock.now_us().saturating_sub(start) < duration_us {
            let volts_ac = self.converter.sample_volts(adc) - center_volts;
            let amps = volts_ac / effective_sensitivity;
            acc_sq += amps as f64 * amps as f64;
            samples += 1;
            clock.delay_us(self.sample_delay_us);
        }

        if samples == 0 {
            return 0.0;
        }

        log_debug!("rms window: {} samples over {} us", samples, duration_us);
        libm::sqrt(acc_sq / samples as f64) as f32
    }
}
