//! Firmware constants and runtime configuration.

use crate::utils::protocol::{DirectionParsing, Position};

/// Firmware version reported by the `V` command and the startup banner.
pub const VERSION: &str = "1.0.0";

/// Byte that ends every command on the command channel.
pub const TERMINATOR: u8 = b';';

/// Diagnostic channel baud rate (hardware serial / USB).
pub const DEBUG_BAUDRATE: u32 = 9600;
/// Command channel baud rate (serial link to the Pi).
pub const CONTROLLER_BAUDRATE: u32 = 9600;

/// Longest command line kept while waiting for a terminator.
pub const MAX_LINE_LEN: usize = 32;

/// Default I2C address of the PCA9685 on the motor shield.
pub const SHIELD_ADDRESS: u8 = 0x60;
/// PCA9685 prescale for roughly 1.6 kHz motor PWM.
pub const SHIELD_PRESCALE: u8 = 3;

/// Motor shield port (1..=4) each wheel is wired to.
pub const MOTOR_FRONT_LEFT_ID: u8 = 2;
pub const MOTOR_FRONT_RIGHT_ID: u8 = 1;
pub const MOTOR_REAR_LEFT_ID: u8 = 3;
pub const MOTOR_REAR_RIGHT_ID: u8 = 4;

/// Runtime-tunable settings. Anything not set explicitly falls back to the
/// constants above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub direction_parsing: DirectionParsing,
    pub shield_address: u8,
    /// Shield port per wheel, indexed by [`Position::index`].
    pub wiring: [u8; 4],
}

impl Config {
    pub fn new(
        direction_parsing: Option<DirectionParsing>,
        shield_address: Option<u8>,
    ) -> Self {
        Self {
            direction_parsing: direction_parsing.unwrap_or_default(),
            shield_address: shield_address.unwrap_or(SHIELD_ADDRESS),
            wiring: [
                MOTOR_FRONT_LEFT_ID,
                MOTOR_FRONT_RIGHT_ID,
                MOTOR_REAR_LEFT_ID,
                MOTOR_REAR_RIGHT_ID,
            ],
        }
    }

    /// Shield port the given wheel is wired to.
    pub fn port_of(
        &self,
        position: Position,
    ) -> u8 {
        self.wiring[position.index()]
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None)
    }
}
