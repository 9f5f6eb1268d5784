use core::cell::RefCell;
use std::convert::Infallible;

use embedded_hal::i2c::{ErrorType, I2c, Operation};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};
use orover_core::utils::{
    config::Config,
    controllers::{MotorDriver, MotorShield, ShieldError},
    protocol::{Drive, Position},
};

/// Default I2C address of the motor shield PCA9685.
pub const SHIELD_ADDRESS: u8 = 0x60;

/// Create a write transaction for the given I2C address and data payload.
pub fn write(
    addr: u8,
    data: Vec<u8>,
) -> I2cTrans {
    I2cTrans::write(addr, data)
}

/// Bus that accepts everything and keeps a log of register writes.
#[derive(Default)]
struct RecordingBus {
    writes: Vec<(u8, Vec<u8>)>,
}

impl RecordingBus {
    /// Writes that address a channel register, MODE1 traffic filtered out.
    fn channel_writes(&self) -> Vec<Vec<u8>> {
        self.writes
            .iter()
            .filter(|(_, data)| data.first().is_some_and(|&reg| reg >= 0x06 && reg < 0x46))
            .map(|(_, data)| data.clone())
            .collect()
    }
}

impl ErrorType for RecordingBus {
    type Error = Infallible;
}

impl I2c for RecordingBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for op in operations {
            match op {
                Operation::Write(data) => self.writes.push((address, data.to_vec())),
                Operation::Read(buf) => buf.fill(0),
            }
        }
        Ok(())
    }
}

/// First ON_L register of a PCA9685 channel.
fn led_base(channel: u8) -> u8 {
    0x06 + 4 * channel
}

fn targets(
    data: &[u8],
    channel: u8,
) -> bool {
    let base = led_base(channel);
    (base..base + 4).contains(&data[0])
}

#[test]
fn test_set_speed_writes_pwm_channel() {
    // Front right is wired to port M1, whose speed PWM is channel 8.
    let expectations = [
        write(SHIELD_ADDRESS, vec![0x00, 0x31]),
        write(SHIELD_ADDRESS, vec![0x26, 0x00, 0x00, 0xF0, 0x0F]),
        write(SHIELD_ADDRESS, vec![0x3A, 0x00, 0x00, 0x00, 0x08]),
    ];

    let mock = I2cMock::new(&expectations);
    let i2c_bus = RefCell::new(mock);
    let mut shield = MotorShield::new(&i2c_bus, &Config::default()).unwrap();
    shield.set_speed(Position::FrontRight, 255).unwrap();
    // Front left is on M2, PWM channel 13.
    shield.set_speed(Position::FrontLeft, 128).unwrap();
    i2c_bus.borrow_mut().done();
}

#[test]
fn test_new_does_not_touch_bus() {
    let expectations: [I2cTrans; 0] = [];
    let mock = I2cMock::new(&expectations);
    let i2c_bus = RefCell::new(mock);
    let _shield = MotorShield::new(&i2c_bus, &Config::default()).unwrap();
    i2c_bus.borrow_mut().done();
}

#[test]
fn test_invalid_wiring_is_rejected() {
    let expectations: [I2cTrans; 0] = [];
    let mock = I2cMock::new(&expectations);
    let i2c_bus = RefCell::new(mock);
    let mut config = Config::default();
    config.wiring[Position::RearLeft.index()] = 5;

    let result = MotorShield::new(&i2c_bus, &config);
    assert!(matches!(result, Err(ShieldError::InvalidPort(5))));
    i2c_bus.borrow_mut().done();
}

#[test]
fn test_begin_enables_and_sets_prescale() {
    let i2c_bus = RefCell::new(RecordingBus::default());
    let mut shield = MotorShield::new(&i2c_bus, &Config::default()).unwrap();
    shield.begin().unwrap();
    drop(shield);

    let bus = i2c_bus.borrow();
    assert_eq!(
        bus.writes[..4],
        [
            (SHIELD_ADDRESS, vec![0x00, 0x01]),
            (SHIELD_ADDRESS, vec![0x00, 0x11]),
            (SHIELD_ADDRESS, vec![0xFE, 3]),
            (SHIELD_ADDRESS, vec![0x00, 0x01]),
        ]
    );
    // Every motor released: two direction pins per port.
    assert_eq!(bus.channel_writes().len(), 8);
}

#[test]
fn test_run_drives_direction_pins_in_order() {
    let i2c_bus = RefCell::new(RecordingBus::default());
    let mut shield = MotorShield::new(&i2c_bus, &Config::default()).unwrap();

    // M1: IN2 = channel 9, IN1 = channel 10. Forward lowers IN2 then raises
    // IN1; raising takes a full-on write plus clearing full-off.
    shield.run(Position::FrontRight, Drive::Forward).unwrap();
    shield.run(Position::FrontRight, Drive::Backward).unwrap();
    drop(shield);

    let writes = i2c_bus.borrow().channel_writes();
    let order: Vec<u8> = writes
        .iter()
        .map(|w| if targets(w, 9) { 9 } else if targets(w, 10) { 10 } else { 0 })
        .collect();
    assert_eq!(order, [9, 10, 10, 10, 9, 9]);
}

#[test]
fn test_stop_all_touches_every_port() {
    let i2c_bus = RefCell::new(RecordingBus::default());
    let mut shield = MotorShield::new(&i2c_bus, &Config::default()).unwrap();
    shield.stop_all().unwrap();
    drop(shield);

    let writes = i2c_bus.borrow().channel_writes();
    let hits = |channel: u8| writes.iter().filter(|w| targets(w, channel)).count();
    for channel in [3, 4, 5, 6, 9, 10, 11, 12] {
        assert_eq!(hits(channel), 1, "direction channel {}", channel);
    }
    // Speed PWM is left alone by a release.
    for channel in [2, 7, 8, 13] {
        assert_eq!(hits(channel), 0, "speed channel {}", channel);
    }
}
