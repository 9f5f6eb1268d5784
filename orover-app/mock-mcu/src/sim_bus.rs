//! Simulated PCA9685 on a host-side I2C bus.
//!
//! Keeps the chip's register file so the real `MotorShield` driver can run
//! unmodified, then decodes the registers back into what each wheel is doing.

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use orover_core::utils::{config::Config, controllers::PortPins, protocol::Position};
use serde::Serialize;

const MODE1: usize = 0x00;
const MODE1_SLEEP: u8 = 0x10;
const MODE1_AUTO_INCREMENT: u8 = 0x20;
const LED0_ON_L: usize = 0x06;
/// Bit 4 of the ON_H / OFF_H registers.
const FULL: u16 = 0x1000;

pub struct SimPca9685 {
    address: u8,
    regs: [u8; 256],
    pointer: u8,
}

impl SimPca9685 {
    pub fn new(address: u8) -> Self {
        let mut regs = [0u8; 256];
        // Power-on default: asleep, ALLCALL on.
        regs[MODE1] = 0x11;
        Self {
            address,
            regs,
            pointer: 0,
        }
    }

    pub fn is_asleep(&self) -> bool {
        self.regs[MODE1] & MODE1_SLEEP != 0
    }

    fn register_pair(
        &self,
        reg: usize,
    ) -> u16 {
        u16::from(self.regs[reg]) | (u16::from(self.regs[reg + 1]) << 8)
    }

    /// Effective duty of a channel in 1/4096 steps.
    pub fn duty(
        &self,
        channel: u8,
    ) -> u16 {
        let base = LED0_ON_L + 4 * usize::from(channel);
        let on = self.register_pair(base);
        let off = self.register_pair(base + 2);
        if off & FULL != 0 {
            0
        } else if on & FULL != 0 {
            4096
        } else {
            (off & 0x0FFF).wrapping_sub(on & 0x0FFF) & 0x0FFF
        }
    }

    fn is_high(
        &self,
        channel: u8,
    ) -> bool {
        self.duty(channel) >= 2048
    }

    /// Decoded state of every wheel, in `Position::ALL` order.
    pub fn wheels(
        &self,
        config: &Config,
    ) -> Vec<WheelState> {
        Position::ALL
            .into_iter()
            .filter_map(|position| {
                let pins = PortPins::for_port(config.port_of(position))?;
                let output = match (self.is_high(pins.in1), self.is_high(pins.in2)) {
                    _ if self.is_asleep() => Output::Release,
                    (true, false) => Output::Forward,
                    (false, true) => Output::Backward,
                    (false, false) => Output::Release,
                    (true, true) => Output::Brake,
                };
                Some(WheelState {
                    position,
                    output,
                    speed: self.duty(pins.pwm) / 16,
                })
            })
            .collect()
    }

    fn store(
        &mut self,
        data: &[u8],
    ) {
        let Some((&reg, payload)) = data.split_first() else {
            return;
        };
        self.pointer = reg;
        for &byte in payload {
            self.regs[usize::from(self.pointer)] = byte;
            if self.regs[MODE1] & MODE1_AUTO_INCREMENT != 0 {
                self.pointer = self.pointer.wrapping_add(1);
            }
        }
    }

    fn load(
        &mut self,
        buf: &mut [u8],
    ) {
        for byte in buf {
            *byte = self.regs[usize::from(self.pointer)];
            if self.regs[MODE1] & MODE1_AUTO_INCREMENT != 0 {
                self.pointer = self.pointer.wrapping_add(1);
            }
        }
    }
}

impl ErrorType for SimPca9685 {
    type Error = ErrorKind;
}

impl I2c for SimPca9685 {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        for op in operations {
            match op {
                Operation::Write(data) => self.store(data),
                Operation::Read(buf) => self.load(buf),
            }
        }
        Ok(())
    }
}

/// What the H-bridge of one port is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Output {
    Forward,
    Backward,
    Release,
    Brake,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WheelState {
    pub position: Position,
    pub output: Output,
    /// PWM magnitude on the 0..=255 scale.
    pub speed: u16,
}
