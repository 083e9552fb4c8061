//! Noise-floor calibration
//!
//! Even with no load connected the RMS engine reads a small nonzero
//! current: sensor noise plus conversion noise. That floor is captured
//! once at startup, under a known-zero-load assumption, and subtracted
//! from every live reading afterwards. The subtraction is linear rather
//! than a threshold: small real currents just above the floor stay
//! distinguishable, while readings at or below it clamp to exactly zero.

use crate::adc::AdcReader;
use crate::rms::RmsEngine;
use crate::time::Clock;

/// RMS current observed with no load, captured once and never updated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseFloor {
    amps: f32,
}

impl NoiseFloor {
    /// Wrap an already-measured floor. Negative inputs clamp to zero so
    /// the floor is always usable as a subtractive baseline.
    pub fn new(amps: f32) -> Self {
        Self {
            amps: if amps > 0.0 { amps } else { 0.0 },
        }
    }

    /// A floor of zero (no calibration performed yet).
    pub const fn zero() -> Self {
        Self { amps: 0.0 }
    }

    /// Capture the floor by running the RMS engine against the initial
    /// center voltage while no load is connected.
    pub fn capture<A: AdcReader, C: Clock>(
        engine: &RmsEngine,
        cycles: u16,
        center_volts: f32,
        effective_sensitivity: f32,
        adc: &mut A,
        clock: &mut C,
    ) -> Self {
        Self::new(engine.measure(cycles, center_volts, effective_sensitivity, adc, clock))
    }

    /// The captured floor in amps.
    pub fn amps(&self) -> f32 {
        self.amps
    }

    /// Subtract the floor from a live reading.
    ///
    /// Returns `max(0, measured - floor)`: never negative, exactly zero
    /// for anything at or below the floor.
    pub fn apply(&self, measured_amps: f32) -> f32 {
        let net = measured_amps - self.amps;
        if net > 0.0 {
            net
        } else {
            0.0
        }
    }
}
