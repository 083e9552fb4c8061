//! Board and mains constants
//!
//! Central place for the numbers that describe the measurement hardware:
//! the ADC front-end, the Hall-effect sensor, the mains supply model and
//! the sampling cadence. Everything runtime-tunable lives in
//! [`MeterConfig`](crate::config::MeterConfig) instead; these are the
//! compile-time facts of the board.

/// Full-scale voltage of the analog input in volts.
pub const ADC_VMAX: f32 = 3.3;

/// Number of representable ADC codes (10-bit converter).
pub const ADC_RESOLUTION: u16 = 1024;

/// Sensor output sensitivity in volts per amp (ACS712 20 A part).
pub const SENS_VOLTS_PER_AMP: f32 = 0.100;

/// Resistive divider between the 5 V sensor output and the 3.3 V ADC input.
///
/// The sensor swings around 2.5 V at its own supply; the divider scales
/// that into the ADC range, so the effective sensitivity seen by the
/// converter is `SENS_VOLTS_PER_AMP * OUT_SCALING`.
pub const OUT_SCALING: f32 = 3.3 / 5.0;

/// Nominal mains voltage in volts, used for the active power model.
pub const MAINS_VOLTAGE: f32 = 220.0;

/// Assumed power factor of the monitored load.
pub const POWER_FACTOR: f32 = 0.90;

/// Mains frequency in hertz.
pub const MAINS_FREQ_HZ: f32 = 60.0;

/// Mains cycles per RMS window (5 cycles at 60 Hz is roughly 83 ms).
///
/// Fewer cycles update faster but read noisier on non-stationary loads.
pub const CYCLES_FAST: u16 = 5;

/// Delay between consecutive ADC conversions in microseconds.
///
/// Keeps the sampling loop from saturating the converter.
pub const SAMPLE_DELAY_US: u32 = 50;

/// Startup offset-estimation window in milliseconds.
pub const OFFSET_LONG_MS: u32 = 500;

/// Steady-state offset-tracking window in milliseconds.
pub const OFFSET_SHORT_MS: u32 = 50;

/// Weight of the previous center-voltage estimate when blending in a
/// fresh short-window measurement. The fresh estimate gets the
/// complement, so offset tracks slow thermal drift without chasing a
/// single noisy window.
pub const OFFSET_SMOOTHING: f32 = 0.98;

/// Idle time between control-loop iterations in milliseconds
/// (roughly ten readings per second).
pub const LOOP_DELAY_MS: u32 = 100;
