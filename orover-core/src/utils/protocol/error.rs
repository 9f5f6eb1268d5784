//! Reasons a command line is discarded.

use core::{ascii, fmt};

use crate::utils::config::MAX_LINE_LEN;

/// Validation failures. None of them are fatal: the line is logged and
/// dropped, and the firmware keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// A terminator with nothing before it.
    Empty,
    /// First character is not `S`, `M` or `V`.
    Unknown(u8),
    StopHasParameters,
    /// `M` command whose length is not 8.
    MotorLength(usize),
    MotorSpeedMissing,
    MotorDirectionMissing,
    MotorDirectionInvalid(u8),
    MotorInvalid,
    /// More than `MAX_LINE_LEN` bytes arrived before a terminator.
    LineTooLong,
}

const MOTOR_FORMAT: &str = "Motor command ignored, not in format MxxDySzz.";

impl fmt::Display for CommandError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            CommandError::Empty => f.write_str("Ignored empty command"),
            CommandError::Unknown(c) => {
                write!(f, "Ignored unknown command -{}- received", ascii::escape_default(*c))
            }
            CommandError::StopHasParameters => f.write_str(
                "S - Stop command should not have extra parameters. Command ignored.",
            ),
            CommandError::MotorLength(_) => write!(f, "{MOTOR_FORMAT} Length invalid"),
            CommandError::MotorSpeedMissing => write!(f, "{MOTOR_FORMAT} Speed missing"),
            CommandError::MotorDirectionMissing => write!(f, "{MOTOR_FORMAT} Direction missing"),
            CommandError::MotorDirectionInvalid(_) => {
                write!(f, "{MOTOR_FORMAT} Direction invalid")
            }
            CommandError::MotorInvalid => write!(f, "{MOTOR_FORMAT} Motor invalid"),
            CommandError::LineTooLong => {
                write!(f, "Command ignored, longer than {MAX_LINE_LEN} characters")
            }
        }
    }
}
