//! Module Exports
//!
//! Command execution for the actor board.
//!
//! - `motors`: the `MotorDriver` seam between commands and hardware.
//! - `shield`: PCA9685 motor shield implementing `MotorDriver`.
//!
//! `Controller` owns both serial channels, the motor driver and the line
//! buffer, and runs one cooperative polling step per call.

pub mod motors;
pub mod shield;

use embedded_io::{Read, ReadReady, Write, WriteReady};

pub use motors::MotorDriver;
pub use shield::{MotorShield, PortPins, ShieldError};

use crate::utils::{
    config::{Config, MAX_LINE_LEN, TERMINATOR, VERSION},
    connection::{serial, Console, Frame, LineBuffer},
    protocol::{self, Command, CommandError, MotorCommand},
};

/// What a completed command line resulted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Stopped,
    Motor(MotorCommand),
    Version,
    /// Line was logged and dropped.
    Rejected(CommandError),
}

/// Failures of the channels or the motor hardware. Malformed input is never
/// reported here, see [`Outcome::Rejected`].
#[derive(Debug)]
pub enum ControllerError<PE, ME> {
    Port(PE),
    Motor(ME),
}

pub struct Controller<P, D, W> {
    port: P,
    motors: D,
    console: Console<W>,
    line: LineBuffer<MAX_LINE_LEN>,
    config: Config,
}

impl<P, D, W> Controller<P, D, W>
where
    P: Read + ReadReady + Write,
    D: MotorDriver,
    W: Write + WriteReady,
{
    /// `port` is the command channel, `diagnostics` the debug channel.
    pub fn new(
        port: P,
        motors: D,
        diagnostics: W,
        config: Config,
    ) -> Self {
        Self {
            port,
            motors,
            console: Console::new(diagnostics),
            line: LineBuffer::new(),
            config,
        }
    }

    /// Wait for the debug channel and print the startup banner.
    pub fn setup(&mut self) {
        self.console.wait_ready();
        self.console
            .println(format_args!("oRover Actor Version {}", VERSION));
        tracing::info!(version = VERSION, "actor started");
    }

    /// One loop iteration: consume at most one byte from the command channel
    /// and, if it completed a line, execute it.
    pub fn poll(&mut self) -> Result<Option<Outcome>, ControllerError<P::Error, D::Error>> {
        let Some(byte) = serial::poll_byte(&mut self.port).map_err(ControllerError::Port)? else {
            return Ok(None);
        };

        match self.line.push(byte) {
            None => Ok(None),
            Some(Frame::Line(line)) => self.dispatch(&line).map(Some),
            Some(Frame::Overflow) => Ok(Some(self.reject(CommandError::LineTooLong))),
        }
    }

    /// Poll forever. Channel and hardware faults are logged and the loop
    /// carries on with the next byte.
    pub fn run(&mut self) -> ! {
        loop {
            if let Err(error) = self.poll() {
                tracing::error!(?error, "command loop fault");
            }
        }
    }

    /// Execute one complete command line (terminator already stripped).
    pub fn dispatch(
        &mut self,
        line: &[u8],
    ) -> Result<Outcome, ControllerError<P::Error, D::Error>> {
        self.console
            .println(format_args!("Command received -{}-", line.escape_ascii()));
        tracing::debug!(len = line.len(), "command received");

        let command = match protocol::parse(line, self.config.direction_parsing) {
            Ok(command) => command,
            Err(error) => return Ok(self.reject(error)),
        };

        match command {
            Command::Stop => {
                self.motors.stop_all().map_err(ControllerError::Motor)?;
                self.console.println(format_args!("All motors stopped"));
                tracing::info!("all motors released");
                Ok(Outcome::Stopped)
            }
            Command::Motor(cmd) => {
                self.motors
                    .set_speed(cmd.position, cmd.magnitude)
                    .map_err(ControllerError::Motor)?;
                self.motors
                    .run(cmd.position, cmd.direction.into())
                    .map_err(ControllerError::Motor)?;
                self.console.println(format_args!(
                    "Motor {} going {} at speed {}/255",
                    cmd.position.label(),
                    cmd.direction.label(),
                    cmd.magnitude
                ));
                tracing::info!(
                    motor = cmd.position.code(),
                    direction = cmd.direction.label(),
                    speed = cmd.magnitude,
                    "motor updated"
                );
                Ok(Outcome::Motor(cmd))
            }
            Command::Version => {
                serial::send(
                    &mut self.port,
                    &[b"V".as_slice(), VERSION.as_bytes(), &[TERMINATOR]],
                )
                .map_err(ControllerError::Port)?;
                tracing::debug!(version = VERSION, "version sent");
                Ok(Outcome::Version)
            }
        }
    }

    fn reject(
        &mut self,
        error: CommandError,
    ) -> Outcome {
        self.console.println(format_args!("{}", error));
        tracing::warn!(?error, "command rejected");
        Outcome::Rejected(error)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn motors(&self) -> &D {
        &self.motors
    }

    pub fn diagnostics(&self) -> &W {
        self.console.inner()
    }

    /// Bytes of the line currently being assembled.
    pub fn pending(&self) -> &[u8] {
        self.line.pending()
    }
}
