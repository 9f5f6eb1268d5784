//! Utility re-exports for the oRover actor firmware.
//!
//! - `config`: fixed constants and the runtime `Config`
//! - `connection`: line framing and the serial/console seams
//! - `controllers`: motor drivers and the command `Controller`
//! - `math`: percentage to device magnitude scaling
//! - `protocol`: the `S` / `M..` / `V` command grammar

pub mod config;
pub mod connection;
pub mod controllers;
pub mod math;
pub mod protocol;

pub use config::Config;
pub use controllers::{Controller, ControllerError, MotorDriver, MotorShield, Outcome};
pub use protocol::{Command, CommandError, Direction, Drive, MotorCommand, Position};
