//! PCA9685 based DC motor shield.
//!
//! Drives the four H-bridge ports of an Adafruit Motor Shield V2 style board:
//! one PCA9685 on the I2C bus provides a speed PWM plus two direction inputs
//! per port.
//!
//! | Port | PWM | IN2 | IN1 |
//! |------|-----|-----|-----|
//! | M1   | 8   | 9   | 10  |
//! | M2   | 13  | 12  | 11  |
//! | M3   | 2   | 3   | 4   |
//! | M4   | 7   | 6   | 5   |

use core::cell::RefCell;

use embedded_hal::i2c::I2c;
use embedded_hal_bus::i2c::RefCellDevice;
use pwm_pca9685::{Address as PwmAddress, Channel, Error as PwmError, Pca9685};

use crate::utils::{
    config::{Config, SHIELD_PRESCALE},
    controllers::motors::MotorDriver,
    protocol::{Drive, Position},
};

/// Speed 0..=255 is spread over the 12-bit PWM counter.
const SPEED_TO_DUTY: u16 = 16;

/// Errors that can occur when talking to the motor shield.
#[derive(Debug)]
pub enum ShieldError<E: core::fmt::Debug> {
    PwmError(PwmError<E>),
    /// Wiring refers to a port other than 1..=4.
    InvalidPort(u8),
}

/// PCA9685 channel numbers behind one shield port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortPins {
    pub pwm: u8,
    pub in1: u8,
    pub in2: u8,
}

impl PortPins {
    /// Pins for shield port `port` (1..=4).
    pub const fn for_port(port: u8) -> Option<Self> {
        let (pwm, in2, in1) = match port {
            1 => (8, 9, 10),
            2 => (13, 12, 11),
            3 => (2, 3, 4),
            4 => (7, 6, 5),
            _ => return None,
        };
        Some(Self { pwm, in1, in2 })
    }
}

fn channel(pin: u8) -> Channel {
    match pin {
        0 => Channel::C0,
        1 => Channel::C1,
        2 => Channel::C2,
        3 => Channel::C3,
        4 => Channel::C4,
        5 => Channel::C5,
        6 => Channel::C6,
        7 => Channel::C7,
        8 => Channel::C8,
        9 => Channel::C9,
        10 => Channel::C10,
        11 => Channel::C11,
        12 => Channel::C12,
        13 => Channel::C13,
        14 => Channel::C14,
        _ => Channel::C15,
    }
}

/// Four-port DC motor shield sharing the I2C bus with anything else on it.
pub struct MotorShield<'a, I2C: 'static> {
    pub pwm: Pca9685<RefCellDevice<'a, I2C>>,
    ports: [PortPins; 4],
}

impl<'a, I2C, E> MotorShield<'a, I2C>
where
    I2C: I2c<Error = E> + 'static,
    E: core::fmt::Debug,
{
    /// Bind the shield at `config.shield_address` and resolve the wheel wiring.
    ///
    /// No bus traffic happens until [`MotorShield::begin`].
    pub fn new(
        i2c_bus: &'a RefCell<I2C>,
        config: &Config,
    ) -> Result<Self, ShieldError<E>> {
        let pwm = Pca9685::new(
            RefCellDevice::new(i2c_bus),
            PwmAddress::from(config.shield_address),
        )
        .map_err(ShieldError::PwmError)?;

        let resolve = |position: Position| -> Result<PortPins, ShieldError<E>> {
            let port = config.port_of(position);
            PortPins::for_port(port).ok_or(ShieldError::InvalidPort(port))
        };
        // Same order as `Position::index`.
        let ports = [
            resolve(Position::FrontLeft)?,
            resolve(Position::FrontRight)?,
            resolve(Position::RearLeft)?,
            resolve(Position::RearRight)?,
        ];

        Ok(Self { pwm, ports })
    }

    /// Wake the PCA9685, set the PWM frequency and release every motor.
    pub fn begin(&mut self) -> Result<(), ShieldError<E>> {
        self.pwm.enable().map_err(ShieldError::PwmError)?;
        tracing::info!("motor shield PWM enabled");
        self.pwm
            .set_prescale(SHIELD_PRESCALE)
            .map_err(ShieldError::PwmError)?;
        tracing::info!(prescale = SHIELD_PRESCALE, "motor shield prescale set");
        self.stop_all()
    }

    /// Pins wired to the given wheel.
    pub fn pins(
        &self,
        position: Position,
    ) -> PortPins {
        self.ports[position.index()]
    }

    fn set_pin(
        &mut self,
        pin: u8,
        high: bool,
    ) -> Result<(), ShieldError<E>> {
        let channel = channel(pin);
        if high {
            // Full-off wins over full-on, so clear it after raising full-on.
            self.pwm
                .set_channel_full_on(channel, 0)
                .map_err(ShieldError::PwmError)?;
            self.pwm
                .set_channel_off(channel, 0)
                .map_err(ShieldError::PwmError)
        } else {
            self.pwm
                .set_channel_full_off(channel)
                .map_err(ShieldError::PwmError)
        }
    }
}

impl<'a, I2C, E> MotorDriver for MotorShield<'a, I2C>
where
    I2C: I2c<Error = E> + 'static,
    E: core::fmt::Debug,
{
    type Error = ShieldError<E>;

    fn set_speed(
        &mut self,
        position: Position,
        speed: u8,
    ) -> Result<(), Self::Error> {
        let channel = channel(self.ports[position.index()].pwm);
        self.pwm
            .set_channel_on_off(channel, 0, u16::from(speed) * SPEED_TO_DUTY)
            .map_err(ShieldError::PwmError)
    }

    fn run(
        &mut self,
        position: Position,
        drive: Drive,
    ) -> Result<(), Self::Error> {
        let PortPins { in1, in2, .. } = self.ports[position.index()];
        // Drop the active side first so both inputs are never high together.
        match drive {
            Drive::Forward => {
                self.set_pin(in2, false)?;
                self.set_pin(in1, true)
            }
            Drive::Backward => {
                self.set_pin(in1, false)?;
                self.set_pin(in2, true)
            }
            Drive::Release => {
                self.set_pin(in1, false)?;
                self.set_pin(in2, false)
            }
        }
    }
}
