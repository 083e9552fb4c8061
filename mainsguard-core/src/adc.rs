//! Analog front-end: raw ADC codes and their voltage interpretation
//!
//! The hardware is reached through [`AdcReader`], a single-method trait
//! that performs one conversion per call. Everything above it works in
//! volts via [`AdcConverter`], which owns the reference voltage and
//! resolution of the converter.
//!
//! Two reader implementations ship with the crate for hosts without the
//! sensor attached: [`ConstantAdc`] (a stuck code, useful for zero-signal
//! tests) and [`SineAdc`] (a synthetic mains waveform).

/// One ADC conversion per call.
///
/// Conversions always succeed and complete in bounded, small, constant
/// time; out-of-range codes cannot occur by construction of the
/// converter width.
pub trait AdcReader {
    /// Trigger a conversion and return the raw code.
    fn read_raw(&mut self) -> u16;
}

/// Linear mapping between raw ADC codes and input voltage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdcConverter {
    vmax: f32,
    resolution: u16,
}

impl AdcConverter {
    /// Create a converter for a given full-scale voltage and code count.
    pub const fn new(vmax: f32, resolution: u16) -> Self {
        Self { vmax, resolution }
    }

    /// Convert a raw code to volts.
    ///
    /// `0` maps to `0.0` and `resolution - 1` maps to `vmax`; the mapping
    /// is monotonic in between. Codes beyond the converter width are
    /// clamped to full scale.
    pub fn code_to_volts(&self, code: u16) -> f32 {
        let top = self.resolution - 1;
        let code = if code > top { top } else { code };
        code as f32 * self.vmax / top as f32
    }

    /// Perform one conversion and return the result in volts.
    pub fn sample_volts<A: AdcReader>(&self, adc: &mut A) -> f32 {
        self.code_to_volts(adc.read_raw())
    }

    /// Half of full scale, the fallback center-voltage estimate.
    pub fn midpoint_volts(&self) -> f32 {
        self.vmax / 2.0
    }

    /// Full-scale voltage of the input.
    pub fn vmax(&self) -> f32 {
        self.vmax
    }
}

impl Default for AdcConverter {
    fn default() -> Self {
        Self::new(crate::constants::ADC_VMAX, crate::constants::ADC_RESOLUTION)
    }
}

/// Reader that always returns the same code.
#[derive(Debug, Clone, Copy)]
pub struct ConstantAdc {
    code: u16,
}

impl ConstantAdc {
    /// Create a reader stuck at `code`.
    pub const fn new(code: u16) -> Self {
        Self { code }
    }

    /// Change the code returned by subsequent conversions.
    pub fn set_code(&mut self, code: u16) {
        self.code = code;
    }
}

impl AdcReader for ConstantAdc {
    fn read_raw(&mut self) -> u16 {
        self.code
    }
}

/// Synthetic mains waveform: a sine around a center voltage.
///
/// Each conversion advances the phase by a fixed amount, so the observed
/// frequency depends only on how often the reader is sampled. With the
/// default 64 samples per cycle and the standard inter-sample delay the
/// waveform lands near mains frequency, which is close enough for
/// exercising the RMS window logic off-target.
#[derive(Debug, Clone)]
pub struct SineAdc {
    converter: AdcConverter,
    center_volts: f32,
    amplitude_volts: f32,
    phase: f32,
    phase_step: f32,
}

impl SineAdc {
    /// Create a waveform source around `center_volts`.
    ///
    /// `amplitude_volts` is the peak deviation from center; zero amplitude
    /// models an idle sensor (no load), which is what the noise
    /// calibration expects to see at startup.
    pub fn new(converter: AdcConverter, center_volts: f32, amplitude_volts: f32) -> Self {
        Self {
            converter,
            center_volts,
            amplitude_volts,
            phase: 0.0,
            phase_step: 2.0 * core::f32::consts::PI / 64.0,
        }
    }

    /// Set the number of conversions that make up one full cycle.
    pub fn with_samples_per_cycle(mut self, samples: u16) -> Self {
        self.phase_step = 2.0 * core::f32::consts::PI / samples as f32;
        self
    }

    /// Change the waveform amplitude, e.g. to simulate switching a load on.
    pub fn set_amplitude(&mut self, amplitude_volts: f32) {
        self.amplitude_volts = amplitude_volts;
    }

    fn volts_to_code(&self, volts: f32) -> u16 {
        let top = (self.converter.resolution - 1) as f32;
        let scaled = volts * top / self.converter.vmax;
        if scaled <= 0.0 {
            0
        } else if scaled >= top {
            self.converter.resolution - 1
        } else {
            scaled as u16
        }
    }
}

impl AdcReader for SineAdc {
    fn read_raw(&mut self) -> u16 {
        let volts = self.center_volts + self.amplitude_volts * libm::sinf(self.phase);
        self.phase += self.phase_step;
        if self.phase > 2.0 * core::f32::consts::PI {
            self.phase -= 2.0 * core::f32::consts::PI;
        }
        self.volts_to_code(volts)
    }
}
