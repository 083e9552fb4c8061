//! DC-offset estimation (auto-zero calibration)
//!
//! The Hall sensor idles at roughly half the ADC range when no current
//! flows. That center voltage has to be subtracted from every sample
//! before it can be read as a signed current, and it drifts slowly with
//! temperature. The estimator averages the input over a time window to
//! measure it, and blends short steady-state windows into the running
//! estimate with exponential smoothing so single noisy windows cannot
//! move it much.

use crate::adc::{AdcConverter, AdcReader};
use crate::constants::{OFFSET_SMOOTHING, SAMPLE_DELAY_US};
use crate::time::Clock;

/// Windowed-mean estimator for the sensor's zero-current output voltage.
#[derive(Debug, Clone, Copy)]
pub struct OffsetEstimator {
    converter: AdcConverter,
    smoothing: f32,
    sample_delay_us: u32,
}

impl OffsetEstimator {
    /// Create an estimator with the standard smoothing weight and
    /// inter-sample delay.
    pub fn new(converter: AdcConverter) -> Self {
        Self {
            converter,
            smoothing: OFFSET_SMOOTHING,
            sample_delay_us: SAMPLE_DELAY_US,
        }
    }

    /// Override the exponential-smoothing weight given to the previous
    /// estimate in [`blend`](Self::blend).
    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Sample for at least `duration_ms` and return the mean voltage.
    ///
    /// Samples are spaced by the standard inter-sample delay and summed
    /// in double precision. A window that yields no samples (duration of
    /// zero, or a clock anomaly) falls back to the ADC midpoint and logs
    /// a warning.
    pub fn measure<A: AdcReader, C: Clock>(
        &self,
        duration_ms: u32,
        adc: &mut A,
        clock: &mut C,
    ) -> f32 {
        let start = clock.now_ms();
        let mut sum = 0.0f64;
        let mut samples = 0u32;

        while clock.now_ms().saturating_sub(start) < duration_ms as u64 {
            sum += self.converter.sample_volts(adc) as f64;
            samples += 1;
            clock.delay_us(self.sample_delay_us);
        }

        if samples == 0 {
            log_warn!(
                "offset window of {} ms yielded no samples, using ADC midpoint",
                duration_ms
            );
            return self.converter.midpoint_volts();
        }

        log_debug!("offset window: {} samples over {} ms", samples, duration_ms);
        (sum / samples as f64) as f32
    }

    /// Fold a fresh short-window estimate into the running center voltage.
    ///
    /// Steady-state windows are never applied directly; the running value
    /// keeps its smoothing weight and the fresh measurement gets the
    /// complement.
    pub fn blend(&self, current: f32, fresh: f32) -> f32 {
        self.smoothing * current + (1.0 - self.smoothing) * fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adc::ConstantAdc;
    use crate::time::FixedClock;

    #[test]
    fn mean_of_constant_signal_is_that_signal() {
        let conv = AdcConverter::default();
        let est = OffsetEstimator::new(conv);
        let mut adc = ConstantAdc::new(512);
        let mut clock = FixedClock::new();

        let offset = est.measure(50, &mut adc, &mut clock);
        assert!((offset - conv.code_to_volts(512)).abs() < 1e-6);
    }

    #[test]
    fn zero_duration_falls_back_to_midpoint() {
        let conv = AdcConverter::default();
        let est = OffsetEstimator::new(conv);
        let mut adc = ConstantAdc::new(1000);
        let mut clock = FixedClock::new();

        assert_eq!(est.measure(0, &mut adc, &mut clock), conv.midpoint_volts());
    }

    #[test]
    fn blend_weights_previous_estimate() {
        let est = OffsetEstimator::new(AdcConverter::default());

        // 0.98 * 1.0 + 0.02 * 2.0
        let blended = est.blend(1.0, 2.0);
        assert!((blended - 1.02).abs() < 1e-6);
    }

    #[test]
    fn smoothing_override_changes_blend_weight() {
        let est = OffsetEstimator::new(AdcConverter::default()).with_smoothing(0.5);
        assert!((est.blend(1.0, 2.0) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn blend_is_identity_on_agreement() {
        let est = OffsetEstimator::new(AdcConverter::default());
        assert!((est.blend(1.65, 1.65) - 1.65).abs() < 1e-6);
    }
}
