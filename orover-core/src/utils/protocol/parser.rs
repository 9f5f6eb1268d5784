//! Positional parser for command lines.
//!
//! A line is everything received between two terminators, terminator
//! excluded. Checks run in a fixed order and the first failure wins, so a
//! sender always gets the same diagnostic for the same mistake.

use crate::utils::protocol::{
    error::CommandError,
    messages::{Command, Direction, DirectionParsing, MotorCommand, Position},
};

/// `MxxDySzz`
const MOTOR_LEN: usize = 8;
/// `S` plus at most one stray byte.
const STOP_MAX_LEN: usize = 2;

/// Decode one command line.
pub fn parse(
    line: &[u8],
    direction_parsing: DirectionParsing,
) -> Result<Command, CommandError> {
    match line.first() {
        None => Err(CommandError::Empty),
        Some(b'S') => parse_stop(line),
        Some(b'M') => parse_motor(line, direction_parsing).map(Command::Motor),
        // Trailing bytes after `V` are not checked.
        Some(b'V') => Ok(Command::Version),
        Some(&other) => Err(CommandError::Unknown(other)),
    }
}

fn parse_stop(line: &[u8]) -> Result<Command, CommandError> {
    if line.len() > STOP_MAX_LEN {
        return Err(CommandError::StopHasParameters);
    }
    Ok(Command::Stop)
}

fn parse_motor(
    line: &[u8],
    direction_parsing: DirectionParsing,
) -> Result<MotorCommand, CommandError> {
    if line.len() != MOTOR_LEN {
        return Err(CommandError::MotorLength(line.len()));
    }
    if line[5] != b'S' {
        return Err(CommandError::MotorSpeedMissing);
    }
    let percent = to_int(&line[6..8]);

    if line[3] != b'D' {
        return Err(CommandError::MotorDirectionMissing);
    }
    let direction = direction_parsing.decode(line[4])?;

    let position = Position::from_code(&line[1..3]).ok_or(CommandError::MotorInvalid)?;

    Ok(MotorCommand::new(position, direction, percent))
}

impl DirectionParsing {
    fn decode(
        self,
        letter: u8,
    ) -> Result<Direction, CommandError> {
        match self {
            DirectionParsing::Strict => match letter {
                b'F' => Ok(Direction::Forward),
                b'B' => Ok(Direction::Backward),
                other => Err(CommandError::MotorDirectionInvalid(other)),
            },
            // The AVR build compared with `!=`, so its `B` branch is dead.
            DirectionParsing::Legacy => match letter {
                b'F' => Ok(Direction::Backward),
                _ => Ok(Direction::Forward),
            },
        }
    }
}

/// Lenient decimal parse: leading blanks, an optional sign, then digits up
/// to the first non-digit. Yields 0 when no digit is found.
fn to_int(field: &[u8]) -> i32 {
    let mut bytes = field
        .iter()
        .copied()
        .skip_while(u8::is_ascii_whitespace)
        .peekable();

    let negative = match bytes.peek() {
        Some(b'-') => {
            bytes.next();
            true
        }
        Some(b'+') => {
            bytes.next();
            false
        }
        _ => false,
    };

    let value = bytes
        .take_while(u8::is_ascii_digit)
        .fold(0i32, |acc, d| acc * 10 + i32::from(d - b'0'));

    if negative {
        -value
    } else {
        value
    }
}
