//! Command-protocol error types
//!
//! The measurement pipeline itself has no error paths: every degenerate
//! case there resolves to a defined fallback value. Structured errors
//! exist only at the command boundary, where a malformed line earns a
//! textual `ERROR` reply and the loop carries on.
//!
//! Errors are small `Copy` values so they cost nothing to return from
//! the parser hot path and map straight onto their wire replies.

use thiserror_no_std::Error;

/// Result type for command parsing.
pub type CommandResult<T> = Result<T, CommandError>;

/// Ways a command line can fail to parse.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// Line does not begin with the `>` start marker.
    #[error("line does not start with '>'")]
    BadStart,

    /// Line has the start marker but carries no `COMMAND,VALUE` payload.
    #[error("command carries no payload")]
    NoData,

    /// Payload names a command this firmware does not know.
    #[error("unrecognized command")]
    InvalidCmd,
}

impl CommandError {
    /// The exact reply sent over the wire for this error.
    pub fn reply(&self) -> &'static str {
        match self {
            Self::BadStart => ">ERROR,BAD_START",
            Self::NoData => ">ERROR,NO_DATA",
            Self::InvalidCmd => ">ERROR,INVALID_CMD",
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CommandError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::BadStart => defmt::write!(fmt, "bad start marker"),
            Self::NoData => defmt::write!(fmt, "no payload"),
            Self::InvalidCmd => defmt::write!(fmt, "unrecognized command"),
        }
    }
}
