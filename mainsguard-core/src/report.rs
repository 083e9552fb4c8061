//! Human-readable telemetry and banner formatting
//!
//! One telemetry line per loop iteration, plus the one-time startup
//! banner with the captured calibration values. These lines are for
//! humans watching the serial console; the machine-parseable surface is
//! the command protocol in [`command`](crate::command).

use core::fmt::Write;

use crate::energy::PowerSample;
use crate::monitor::Calibration;

/// Maximum length of a formatted report line in bytes.
pub const MAX_REPORT_LEN: usize = 96;

/// A formatted report line, built without allocation.
pub type ReportLine = heapless::String<MAX_REPORT_LEN>;

/// Fixed greeting printed once at startup.
pub const BANNER: &str = "MainsGuard - Hall-effect mains monitor (fast RMS, kWh)";

/// Progress line printed while the startup calibration runs.
pub const CALIBRATING: &str = "Calibrating sensor...";

/// Format one measurement as a telemetry line.
pub fn telemetry_line(sample: &PowerSample) -> ReportLine {
    let mut line = ReportLine::new();
    write!(
        line,
        "I_RMS: {:.3} A | P: {:.1} W | E: {:.6} kWh",
        sample.rms_amps, sample.watts, sample.energy_kwh,
    )
    .ok();
    line
}

/// Format the captured calibration values for the startup banner.
pub fn calibration_line(calibration: &Calibration) -> ReportLine {
    let mut line = ReportLine::new();
    write!(
        line,
        "Offset(V): {:.4} | Noise Irms(A): {:.4}",
        calibration.offset_volts, calibration.noise_amps,
    )
    .ok();
    line
}
