//! Runtime meter configuration
//!
//! Holds the tunables the command interface may change at runtime:
//! nominal mains voltage, assumed power factor and sensor sensitivity.
//! The effective sensitivity seen by the ADC is derived from the sensor
//! sensitivity and the fixed output divider; the setter keeps the two in
//! sync so the derived value can never drift.
//!
//! Nothing here is ambient or global. The store is passed by reference
//! into command execution and into the measurement path, and the control
//! loop serializes the two, so no reading ever sees a half-applied
//! update.

use crate::constants::{MAINS_VOLTAGE, OUT_SCALING, POWER_FACTOR, SENS_VOLTS_PER_AMP};

/// Mutable runtime parameters of the meter.
///
/// Values reset to the board defaults on every boot; nothing is
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MeterConfig {
    nominal_voltage: f32,
    power_factor: f32,
    sensor_sensitivity: f32,
    effective_sensitivity: f32,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            nominal_voltage: MAINS_VOLTAGE,
            power_factor: POWER_FACTOR,
            sensor_sensitivity: SENS_VOLTS_PER_AMP,
            effective_sensitivity: SENS_VOLTS_PER_AMP * OUT_SCALING,
        }
    }
}

impl MeterConfig {
    /// Nominal mains voltage in volts.
    pub fn nominal_voltage(&self) -> f32 {
        self.nominal_voltage
    }

    /// Assumed power factor of the load.
    pub fn power_factor(&self) -> f32 {
        self.power_factor
    }

    /// Sensor sensitivity at the sensor output, in volts per amp.
    pub fn sensor_sensitivity(&self) -> f32 {
        self.sensor_sensitivity
    }

    /// Sensitivity after the output divider, as seen by the ADC.
    pub fn effective_sensitivity(&self) -> f32 {
        self.effective_sensitivity
    }

    /// Set the nominal mains voltage.
    pub fn set_nominal_voltage(&mut self, volts: f32) {
        self.nominal_voltage = volts;
    }

    /// Set the assumed power factor.
    pub fn set_power_factor(&mut self, pf: f32) {
        self.power_factor = pf;
    }

    /// Set the sensor sensitivity and recompute the derived effective
    /// sensitivity from the fixed output divider.
    pub fn set_sensor_sensitivity(&mut self, volts_per_amp: f32) {
        self.sensor_sensitivity = volts_per_amp;
        self.effective_sensitivity = volts_per_amp * OUT_SCALING;
    }
}
