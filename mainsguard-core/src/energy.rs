//! Active power and energy integration
//!
//! Power uses the simplified model `P = V_nominal * I_rms * PF`. The
//! power factor is a configured constant; the true phase angle between
//! voltage and current is never measured.
//!
//! Energy integrates power over wall-clock time between ticks. Each
//! contribution is final: there is no rollback or replay, and the
//! accumulator lives for the process lifetime.

use crate::config::MeterConfig;
use crate::time::Timestamp;

/// One measurement-loop result: the cleaned RMS current, the derived
/// active power and the running energy total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerSample {
    /// RMS current after noise-floor subtraction, in amps.
    pub rms_amps: f32,
    /// Instantaneous active power in watts.
    pub watts: f32,
    /// Cumulative energy since boot in kilowatt-hours.
    pub energy_kwh: f64,
}

/// Cumulative energy state plus the timestamp of the previous tick.
#[derive(Debug, Clone, Copy)]
pub struct EnergyIntegrator {
    energy_kwh: f64,
    last_ms: Timestamp,
}

impl EnergyIntegrator {
    /// Start integrating from `now_ms` with zero accumulated energy.
    ///
    /// Seeding the timestamp at construction makes the first tick cover
    /// a near-zero interval instead of the whole time since boot.
    pub const fn new(now_ms: Timestamp) -> Self {
        Self {
            energy_kwh: 0.0,
            last_ms: now_ms,
        }
    }

    /// Advance the accumulator by one loop iteration.
    ///
    /// Computes active power from the configuration, integrates it over
    /// the hours elapsed since the previous tick and unconditionally
    /// moves the timestamp forward to `now_ms`.
    pub fn tick(&mut self, rms_amps: f32, config: &MeterConfig, now_ms: Timestamp) -> PowerSample {
        let watts = config.nominal_voltage() * rms_amps * config.power_factor();

        let elapsed_ms = now_ms.saturating_sub(self.last_ms);
        self.last_ms = now_ms;

        let elapsed_hours = elapsed_ms as f64 / 3_600_000.0;
        self.energy_kwh += watts as f64 * elapsed_hours / 1_000.0;

        PowerSample {
            rms_amps,
            watts,
            energy_kwh: self.energy_kwh,
        }
    }

    /// Cumulative energy since boot in kilowatt-hours.
    pub fn energy_kwh(&self) -> f64 {
        self.energy_kwh
    }
}
