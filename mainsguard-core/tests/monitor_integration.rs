//! Integration tests for the full measurement loop
//!
//! Drives calibration, steady-state measurement and command handling
//! end-to-end against a scripted waveform and a scripted clock, the way
//! a host loop would drive real hardware.

use mainsguard_core::{
    report, AdcConverter, ConstantAdc, CurrentMonitor, FixedClock, SineAdc,
};

const PEAK_VOLTS: f32 = 0.2;
const CENTER_VOLTS: f32 = 1.65;

/// Monitor on an idle simulated sensor, calibrated and ready.
fn calibrated_sine_monitor() -> CurrentMonitor<SineAdc, FixedClock> {
    let converter = AdcConverter::default();
    let adc = SineAdc::new(converter, CENTER_VOLTS, 0.0).with_samples_per_cycle(64);
    let mut monitor = CurrentMonitor::new(adc, FixedClock::new());
    monitor.calibrate();
    monitor
}

#[test]
fn test_calibration_finds_sensor_center() {
    let monitor_center = calibrated_sine_monitor().center_volts();
    // Quantization keeps the measured center within one code of the
    // configured one.
    assert!((monitor_center - CENTER_VOLTS).abs() < 3.3 / 1023.0);
}

#[test]
fn test_noise_floor_is_quiet_on_idle_sensor() {
    let monitor = calibrated_sine_monitor();
    assert!(monitor.noise_floor().amps() < 1e-3);
}

#[test]
fn test_load_reads_expected_rms_power_and_energy() {
    let mut monitor = calibrated_sine_monitor();
    monitor.adc_mut().set_amplitude(PEAK_VOLTS);

    let sample = monitor.step();

    let sensitivity = monitor.config().effective_sensitivity();
    let expected_rms = PEAK_VOLTS / f32::sqrt(2.0) / sensitivity;
    let rms_error = (sample.rms_amps - expected_rms).abs() / expected_rms;
    assert!(
        rms_error < 0.05,
        "rms {} vs expected {expected_rms}",
        sample.rms_amps
    );

    let expected_watts = 220.0 * sample.rms_amps * 0.90;
    assert!((sample.watts - expected_watts).abs() < 0.1);

    assert!(sample.energy_kwh > 0.0);
}

#[test]
fn test_energy_accumulates_across_iterations() {
    let mut monitor = calibrated_sine_monitor();
    monitor.adc_mut().set_amplitude(PEAK_VOLTS);

    let mut last = 0.0;
    for _ in 0..5 {
        let sample = monitor.step();
        assert!(sample.energy_kwh > last);
        last = sample.energy_kwh;
        monitor.idle();
    }
}

#[test]
fn test_constant_signal_reads_zero_after_calibration() {
    let mut monitor = CurrentMonitor::new(ConstantAdc::new(700), FixedClock::new());
    monitor.calibrate();

    for _ in 0..3 {
        let sample = monitor.step();
        assert_eq!(sample.rms_amps, 0.0);
        assert_eq!(sample.watts, 0.0);
        assert_eq!(sample.energy_kwh, 0.0);
    }
}

#[test]
fn test_sensitivity_command_rescales_readings() {
    let mut monitor = calibrated_sine_monitor();
    monitor.adc_mut().set_amplitude(PEAK_VOLTS);

    let before = monitor.step();

    // Swap in the 5 A sensor variant: 0.185 V/A against the default
    // 0.100 V/A shrinks readings by the same factor.
    let reply = monitor.handle_line(">SET_SENS,0.185");
    assert_eq!(reply.as_str(), ">OK,SET_SENS,0.185");

    let after = monitor.step();
    let expected_ratio = 0.100 / 0.185;
    let ratio = after.rms_amps / before.rms_amps;
    assert!(
        (ratio - expected_ratio).abs() < 0.02,
        "ratio {ratio} vs expected {expected_ratio}"
    );
}

#[test]
fn test_voltage_command_rescales_power_only() {
    let mut monitor = calibrated_sine_monitor();
    monitor.adc_mut().set_amplitude(PEAK_VOLTS);

    let before = monitor.step();
    monitor.handle_line(">SET_V,110.0");
    let after = monitor.step();

    // Current is unaffected; power halves with the nominal voltage.
    let rms_drift = (after.rms_amps - before.rms_amps).abs() / before.rms_amps;
    assert!(rms_drift < 0.02);

    let ratio = after.watts / before.watts;
    assert!((ratio - 0.5).abs() < 0.02, "power ratio {ratio}");
}

#[test]
fn test_telemetry_lines_have_stable_shape() {
    let mut monitor = calibrated_sine_monitor();
    monitor.adc_mut().set_amplitude(PEAK_VOLTS);

    let sample = monitor.step();
    let line = report::telemetry_line(&sample);

    assert!(line.starts_with("I_RMS: "));
    assert!(line.contains(" A | P: "));
    assert!(line.contains(" W | E: "));
    assert!(line.ends_with(" kWh"));
}
