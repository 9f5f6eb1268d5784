//! In-memory stand-ins for the serial channels and the motor hardware.
#![allow(dead_code)]

use std::{collections::VecDeque, convert::Infallible};

use embedded_io::{ErrorType, Read, ReadReady, Write, WriteReady};
use orover_core::utils::{
    config::Config,
    controllers::{Controller, MotorDriver, Outcome},
    protocol::{Drive, Position},
};

/// Command channel: bytes injected by the test, replies captured.
#[derive(Default)]
pub struct MockPort {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

impl MockPort {
    pub fn inject(
        &mut self,
        data: &[u8],
    ) {
        self.rx.extend(data.iter().copied());
    }

    pub fn tx(&self) -> &[u8] {
        &self.tx
    }

    pub fn is_drained(&self) -> bool {
        self.rx.is_empty()
    }
}

impl ErrorType for MockPort {
    type Error = Infallible;
}

impl Read for MockPort {
    fn read(
        &mut self,
        buf: &mut [u8],
    ) -> Result<usize, Self::Error> {
        let mut n = 0;
        while n < buf.len() {
            match self.rx.pop_front() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

impl ReadReady for MockPort {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.rx.is_empty())
    }
}

impl Write for MockPort {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> Result<usize, Self::Error> {
        self.tx.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Debug channel that reports "not ready" for the first `busy_polls` checks.
#[derive(Default)]
pub struct MockConsole {
    pub text: String,
    pub busy_polls: usize,
    pub ready_checks: usize,
}

impl MockConsole {
    pub fn lines(&self) -> Vec<&str> {
        self.text.split("\r\n").filter(|l| !l.is_empty()).collect()
    }
}

impl ErrorType for MockConsole {
    type Error = Infallible;
}

impl Write for MockConsole {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> Result<usize, Self::Error> {
        self.text.push_str(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl WriteReady for MockConsole {
    fn write_ready(&mut self) -> Result<bool, Self::Error> {
        self.ready_checks += 1;
        Ok(self.ready_checks > self.busy_polls)
    }
}

/// Motor driver that remembers the last speed and run mode per wheel.
pub struct RecordingMotors {
    pub speed: [u8; 4],
    pub drive: [Drive; 4],
    pub calls: usize,
}

impl Default for RecordingMotors {
    fn default() -> Self {
        Self {
            speed: [0; 4],
            drive: [Drive::Release; 4],
            calls: 0,
        }
    }
}

impl RecordingMotors {
    pub fn state(
        &self,
        position: Position,
    ) -> (Drive, u8) {
        (self.drive[position.index()], self.speed[position.index()])
    }
}

impl MotorDriver for RecordingMotors {
    type Error = Infallible;

    fn set_speed(
        &mut self,
        position: Position,
        speed: u8,
    ) -> Result<(), Self::Error> {
        self.calls += 1;
        self.speed[position.index()] = speed;
        Ok(())
    }

    fn run(
        &mut self,
        position: Position,
        drive: Drive,
    ) -> Result<(), Self::Error> {
        self.calls += 1;
        self.drive[position.index()] = drive;
        Ok(())
    }
}

pub type TestController = Controller<MockPort, RecordingMotors, MockConsole>;

pub fn controller(config: Config) -> TestController {
    Controller::new(
        MockPort::default(),
        RecordingMotors::default(),
        MockConsole::default(),
        config,
    )
}

/// Inject `data` and poll until every byte has been consumed.
pub fn send(
    ctrl: &mut TestController,
    data: &[u8],
) -> Vec<Outcome> {
    ctrl.port_mut().inject(data);
    let mut outcomes = Vec::new();
    while !ctrl.port().is_drained() {
        if let Some(outcome) = ctrl.poll().unwrap() {
            outcomes.push(outcome);
        }
    }
    outcomes
}
