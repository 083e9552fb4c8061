//! The measurement control loop
//!
//! Single-threaded and cooperative: one [`CurrentMonitor`] owns the ADC,
//! the clock and all measurement state, and the host drives it in a bare
//! loop with no scheduler. Each iteration processes pending command
//! lines first, then runs one measurement step, so configuration changes
//! never interleave with a sampling window.
//!
//! Offset estimation and RMS measurement block the loop for their
//! configured windows. There is no cancellation; commands arriving
//! mid-window wait in the transport until the next iteration.
//!
//! All state is fixed-size and lives for the process lifetime; nothing
//! here allocates.

use crate::adc::{AdcConverter, AdcReader};
use crate::command::{self, Reply};
use crate::config::MeterConfig;
use crate::constants::{CYCLES_FAST, LOOP_DELAY_MS, OFFSET_LONG_MS, OFFSET_SHORT_MS};
use crate::energy::{EnergyIntegrator, PowerSample};
use crate::noise::NoiseFloor;
use crate::offset::OffsetEstimator;
use crate::rms::RmsEngine;
use crate::time::Clock;

/// Values captured by the startup calibration, for the banner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Initial center-voltage estimate from the long averaging window.
    pub offset_volts: f32,
    /// No-load RMS current captured as the noise floor.
    pub noise_amps: f32,
}

/// The complete measurement pipeline behind a single owner.
#[derive(Debug)]
pub struct CurrentMonitor<A: AdcReader, C: Clock> {
    adc: A,
    clock: C,
    config: MeterConfig,
    offset: OffsetEstimator,
    rms: RmsEngine,
    center_volts: f32,
    noise: NoiseFloor,
    energy: EnergyIntegrator,
}

impl<A: AdcReader, C: Clock> CurrentMonitor<A, C> {
    /// Create a monitor with the board-default converter and
    /// configuration. The center voltage starts at the ADC midpoint
    /// until [`calibrate`](Self::calibrate) measures the real offset.
    pub fn new(adc: A, clock: C) -> Self {
        Self::with_config(adc, clock, MeterConfig::default())
    }

    /// Create a monitor with an explicit starting configuration.
    pub fn with_config(adc: A, mut clock: C, config: MeterConfig) -> Self {
        let converter = AdcConverter::default();
        let now_ms = clock.now_ms();
        Self {
            adc,
            clock,
            config,
            offset: OffsetEstimator::new(converter),
            rms: RmsEngine::new(converter),
            center_volts: converter.midpoint_volts(),
            noise: NoiseFloor::zero(),
            energy: EnergyIntegrator::new(now_ms),
        }
    }

    /// Run the startup calibration against a known-zero-load sensor.
    ///
    /// Measures the true sensor offset over the long averaging window,
    /// then captures the no-load noise floor with the RMS engine. The
    /// energy timestamp is re-seeded afterwards so calibration time is
    /// not billed to the first measurement interval.
    pub fn calibrate(&mut self) -> Calibration {
        self.center_volts =
            self.offset
                .measure(OFFSET_LONG_MS, &mut self.adc, &mut self.clock);

        self.noise = NoiseFloor::capture(
            &self.rms,
            CYCLES_FAST,
            self.center_volts,
            self.config.effective_sensitivity(),
            &mut self.adc,
            &mut self.clock,
        );

        let now_ms = self.clock.now_ms();
        self.energy = EnergyIntegrator::new(now_ms);

        let calibration = Calibration {
            offset_volts: self.center_volts,
            noise_amps: self.noise.amps(),
        };
        log_info!(
            "calibrated: offset {} V, noise floor {} A",
            calibration.offset_volts,
            calibration.noise_amps
        );
        calibration
    }

    /// Run one measurement iteration.
    ///
    /// Refines the center voltage with a short window blended into the
    /// running estimate, measures a fresh RMS current, subtracts the
    /// noise floor and advances the energy accumulator over the elapsed
    /// wall-clock time.
    pub fn step(&mut self) -> PowerSample {
        let fresh = self
            .offset
            .measure(OFFSET_SHORT_MS, &mut self.adc, &mut self.clock);
        self.center_volts = self.offset.blend(self.center_volts, fresh);

        let measured = self.rms.measure(
            CYCLES_FAST,
            self.center_volts,
            self.config.effective_sensitivity(),
            &mut self.adc,
            &mut self.clock,
        );
        let rms_amps = self.noise.apply(measured);

        let now_ms = self.clock.now_ms();
        self.energy.tick(rms_amps, &self.config, now_ms)
    }

    /// Execute one command line against the configuration.
    ///
    /// The caller drains all pending lines before the next
    /// [`step`](Self::step), which is what keeps configuration reads
    /// consistent across a measurement window.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        command::execute(line, &mut self.config)
    }

    /// Idle between loop iterations (roughly ten readings per second).
    pub fn idle(&mut self) {
        self.clock.delay_us(LOOP_DELAY_MS * 1_000);
    }

    /// Current configuration.
    pub fn config(&self) -> &MeterConfig {
        &self.config
    }

    /// Running center-voltage estimate.
    pub fn center_volts(&self) -> f32 {
        self.center_volts
    }

    /// Captured noise floor.
    pub fn noise_floor(&self) -> NoiseFloor {
        self.noise
    }

    /// Access the underlying reader, mainly for hosts that simulate the
    /// sensor and need to change the waveform mid-run.
    pub fn adc_mut(&mut self) -> &mut A {
        &mut self.adc
    }
}
