//! Typed commands decoded from the wire.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Wheel position on the chassis. Each one is bound to a fixed motor shield
/// port for the lifetime of the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::FrontLeft,
        Position::FrontRight,
        Position::RearLeft,
        Position::RearRight,
    ];

    pub const fn index(self) -> usize {
        match self {
            Position::FrontLeft => 0,
            Position::FrontRight => 1,
            Position::RearLeft => 2,
            Position::RearRight => 3,
        }
    }

    /// Two-letter code used in `M` commands.
    pub const fn code(self) -> &'static str {
        match self {
            Position::FrontLeft => "FL",
            Position::FrontRight => "FR",
            Position::RearLeft => "RL",
            Position::RearRight => "RR",
        }
    }

    /// Human readable name for the diagnostic log.
    pub const fn label(self) -> &'static str {
        match self {
            Position::FrontLeft => "Front Left",
            Position::FrontRight => "Front Right",
            Position::RearLeft => "Rear Left",
            Position::RearRight => "Rear Right",
        }
    }

    /// Exact match against the two-letter codes.
    pub fn from_code(code: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.code().as_bytes() == code)
    }
}

/// Requested direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub const fn letter(self) -> char {
        match self {
            Direction::Forward => 'F',
            Direction::Backward => 'B',
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}

/// Run mode handed to a motor driver. `Release` lets the motor coast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Drive {
    Forward,
    Backward,
    Release,
}

impl From<Direction> for Drive {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Forward => Drive::Forward,
            Direction::Backward => Drive::Backward,
        }
    }
}

/// How the direction letter of an `M` command is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionParsing {
    /// `F` forward, `B` backward, anything else is rejected.
    #[default]
    Strict,
    /// Behaviour of the 1.0.0 AVR build: `F` runs backward and every other
    /// letter runs forward. Hosts that send `R` for reverse rely on it.
    Legacy,
}

/// A single-motor update, consumed as soon as it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotorCommand {
    pub position: Position,
    pub direction: Direction,
    /// Speed as received, in percent.
    pub percent: i32,
    /// Device-level speed (0..=255) handed to the motor driver.
    pub magnitude: u8,
}

impl MotorCommand {
    pub fn new(
        position: Position,
        direction: Direction,
        percent: i32,
    ) -> Self {
        let magnitude = crate::utils::math::scale::to_device(
            crate::utils::math::scale::percent_to_magnitude(percent),
        );
        Self {
            position,
            direction,
            percent,
            magnitude,
        }
    }
}

/// Wire form, e.g. `MFLDFS50`. Only percentages in `0..=99` round-trip.
impl fmt::Display for MotorCommand {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "M{}D{}S{:02}",
            self.position.code(),
            self.direction.letter(),
            self.percent
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "c", rename_all = "snake_case")]
pub enum Command {
    Stop,
    Motor(MotorCommand),
    Version,
}
