//! Simulated Mains Monitoring Example
//!
//! Runs the full measurement loop against a synthetic mains waveform:
//! calibrate on an idle sensor, switch a simulated load on, then watch
//! RMS current, power and energy accumulate.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_simulated_mains
//! ```

use mainsguard_core::{report, AdcConverter, CurrentMonitor, SineAdc, SystemClock};

fn main() {
    println!("{}", report::BANNER);
    println!("{}", report::CALIBRATING);

    // Idle sensor: centered at mid-scale with no AC swing, which is the
    // zero-load condition the startup calibration expects.
    let converter = AdcConverter::default();
    let adc = SineAdc::new(converter, 1.65, 0.0);
    let mut monitor = CurrentMonitor::new(adc, SystemClock::new());

    let calibration = monitor.calibrate();
    println!("{}", report::calibration_line(&calibration));

    // Switch on a load: a 0.2 V peak swing through the default 0.066 V/A
    // effective sensitivity reads as roughly 2.1 A RMS, a bit under
    // 500 W at 220 V nominal.
    monitor.adc_mut().set_amplitude(0.2);
    println!("Load connected, monitoring:");

    for _ in 0..10 {
        let sample = monitor.step();
        println!("{}", report::telemetry_line(&sample));
        monitor.idle();
    }
}
