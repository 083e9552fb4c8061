//! Core measurement engine for MainsGuard
//!
//! Measures AC mains current through a Hall-effect sensor and derives
//! RMS current, active power and accumulated energy, with runtime
//! calibration over a line-delimited ASCII command channel.
//!
//! Key constraints:
//! - Single bare control loop, no scheduler, no OS concurrency
//! - No heap allocation; all state is fixed-size for the process lifetime
//! - Hardware reached only through traits, so the same core runs on
//!   target, in host simulation or against scripted test doubles
//!
//! ```no_run
//! use mainsguard_core::{CurrentMonitor, SineAdc, AdcConverter, SystemClock, report};
//!
//! let adc = SineAdc::new(AdcConverter::default(), 1.65, 0.0);
//! let mut monitor = CurrentMonitor::new(adc, SystemClock::new());
//!
//! let calibration = monitor.calibrate();
//! println!("{}", report::calibration_line(&calibration));
//!
//! loop {
//!     let sample = monitor.step();
//!     println!("{}", report::telemetry_line(&sample));
//!     monitor.idle();
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

// Optional logging: real log macros on std builds, no-ops elsewhere.
#[cfg(feature = "log")]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}
#[cfg(not(feature = "log"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}
#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}
#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

pub mod adc;
pub mod command;
pub mod config;
pub mod constants;
pub mod energy;
pub mod errors;
pub mod monitor;
pub mod noise;
pub mod offset;
pub mod report;
pub mod rms;
pub mod serial;
pub mod time;

// Public API
pub use adc::{AdcConverter, AdcReader, ConstantAdc, SineAdc};
pub use command::{Command, Reply};
pub use config::MeterConfig;
pub use energy::{EnergyIntegrator, PowerSample};
pub use errors::{CommandError, CommandResult};
pub use monitor::{Calibration, CurrentMonitor};
pub use noise::NoiseFloor;
pub use offset::OffsetEstimator;
pub use rms::RmsEngine;
pub use serial::{LineBuffer, SerialLink};
pub use time::{Clock, FixedClock, Timestamp};

#[cfg(feature = "std")]
pub use time::SystemClock;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
