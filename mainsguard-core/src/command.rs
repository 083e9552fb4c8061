//! Line-delimited ASCII command protocol
//!
//! A command line starts with `>` and carries `COMMAND,VALUE`. The
//! parser is deliberately lenient about numeric payloads: a value that
//! does not parse as a float becomes `0.0` with no further validation.
//! Every outcome, success or failure, produces exactly one reply line.
//!
//! `GET_CONFIG` takes no argument and is accepted without a comma; a
//! trailing `,payload` is tolerated and ignored. Without that special
//! case the comma gate would make the command unreachable.
//!
//! | Command | Reply |
//! |---|---|
//! | `SET_V,<float>` | `>OK,SET_V,<value 1 decimal>` |
//! | `SET_PF,<float>` | `>OK,SET_PF,<value 2 decimals>` |
//! | `SET_SENS,<float>` | `>OK,SET_SENS,<value 3 decimals>` |
//! | `GET_CONFIG` | `>CONFIG,V=<v>,PF=<pf>,SENS=<s>` |

use core::fmt::Write;

use crate::config::MeterConfig;
use crate::errors::{CommandError, CommandResult};

/// Maximum length of a reply line in bytes.
pub const MAX_REPLY_LEN: usize = 128;

/// A single reply line, built in place without allocation.
pub type Reply = heapless::String<MAX_REPLY_LEN>;

/// A parsed, validated command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Set the nominal mains voltage in volts.
    SetVoltage(f32),
    /// Set the assumed power factor.
    SetPowerFactor(f32),
    /// Set the sensor sensitivity in volts per amp.
    SetSensitivity(f32),
    /// Report the current configuration.
    GetConfig,
}

/// Parse one command line.
///
/// The line is expected without its terminating newline; stray
/// surrounding whitespace is ignored.
pub fn parse(line: &str) -> CommandResult<Command> {
    let line = line.trim();
    let payload = line.strip_prefix('>').ok_or(CommandError::BadStart)?;

    match payload.split_once(',') {
        None => match payload {
            // Zero-argument command, exempt from the comma gate.
            "GET_CONFIG" => Ok(Command::GetConfig),
            _ => Err(CommandError::NoData),
        },
        Some((name, value)) => match name {
            "SET_V" => Ok(Command::SetVoltage(parse_lenient(value))),
            "SET_PF" => Ok(Command::SetPowerFactor(parse_lenient(value))),
            "SET_SENS" => Ok(Command::SetSensitivity(parse_lenient(value))),
            "GET_CONFIG" => Ok(Command::GetConfig),
            _ => Err(CommandError::InvalidCmd),
        },
    }
}

/// Lenient float parsing: malformed values become `0.0`.
fn parse_lenient(value: &str) -> f32 {
    value.trim().parse().unwrap_or(0.0)
}

/// Apply a parsed command to the configuration and build its reply.
pub fn apply(command: Command, config: &mut MeterConfig) -> Reply {
    let mut reply = Reply::new();
    let result = match command {
        Command::SetVoltage(volts) => {
            config.set_nominal_voltage(volts);
            write!(reply, ">OK,SET_V,{volts:.1}")
        }
        Command::SetPowerFactor(pf) => {
            config.set_power_factor(pf);
            write!(reply, ">OK,SET_PF,{pf:.2}")
        }
        Command::SetSensitivity(sens) => {
            config.set_sensor_sensitivity(sens);
            write!(reply, ">OK,SET_SENS,{sens:.3}")
        }
        Command::GetConfig => write!(
            reply,
            ">CONFIG,V={:.1},PF={:.2},SENS={:.3}",
            config.nominal_voltage(),
            config.power_factor(),
            config.sensor_sensitivity(),
        ),
    };
    // An oversized value truncates at the reply capacity; the line is
    // still sent rather than dropped.
    result.ok();
    reply
}

/// Parse and execute one line, producing exactly one reply.
pub fn execute(line: &str, config: &mut MeterConfig) -> Reply {
    match parse(line) {
        Ok(command) => apply(command, config),
        Err(error) => {
            let mut reply = Reply::new();
            reply.push_str(error.reply()).ok();
            reply
        }
    }
}
