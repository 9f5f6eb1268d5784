use core::cell::RefCell;
use std::{fs, path::PathBuf, time::Duration};

use clap::Parser;
use embedded_io::ReadReady;
use orover_core::utils::{
    config::{Config, CONTROLLER_BAUDRATE, DEBUG_BAUDRATE, VERSION},
    controllers::{Controller, MotorShield, Outcome},
    protocol::DirectionParsing,
};
use tracing::{error, info};

mod joystick;
mod ports;
mod sim_bus;

use joystick::DriveVector;
use ports::{DebugConsole, HostPort};
use sim_bus::SimPca9685;

/// Run the oRover actor firmware against simulated hardware.
///
/// Commands are read from stdin unless --send, --script or --drive is given.
/// Version replies go to stdout, diagnostics to stderr.
#[derive(Parser)]
#[clap(version = "1.0.0")]
struct Opts {
    /// Transmission to inject, e.g. "MFLDFS50;S;V;"
    #[clap(long)]
    send: Option<String>,
    /// File whose contents are injected as one transmission
    #[clap(long)]
    script: Option<PathBuf>,
    /// Joystick sample SPEED,X,Y converted to motor commands
    #[clap(long, allow_hyphen_values = true)]
    drive: Option<DriveVector>,
    /// Interpret direction letters like the 1.0.0 AVR build
    #[clap(long)]
    legacy_direction: bool,
    /// I2C address of the motor shield (decimal or 0x..)
    #[clap(long, value_parser = parse_address)]
    shield_address: Option<u8>,
    /// Print the decoded wheel states as JSON after each command
    #[clap(long)]
    state_json: bool,
}

fn parse_address(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    parsed.map_err(|e| format!("invalid I2C address {s:?}: {e}"))
}

impl Opts {
    /// Bytes to inject, or `None` to read stdin.
    fn transmission(&self) -> std::io::Result<Option<Vec<u8>>> {
        if self.send.is_none() && self.script.is_none() && self.drive.is_none() {
            return Ok(None);
        }
        let mut data = Vec::new();
        if let Some(path) = &self.script {
            data.extend(fs::read(path)?);
        }
        if let Some(send) = &self.send {
            data.extend_from_slice(send.as_bytes());
        }
        if let Some(vector) = self.drive {
            let stream = joystick::commands(vector);
            info!(%stream, "joystick mixed");
            data.extend_from_slice(stream.as_bytes());
        }
        Ok(Some(data))
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts: Opts = Opts::parse();
    let direction_parsing = opts.legacy_direction.then_some(DirectionParsing::Legacy);
    let config = Config::new(direction_parsing, opts.shield_address);

    let port = match opts.transmission() {
        Ok(Some(data)) => HostPort::scripted(data),
        Ok(None) => HostPort::stdin(),
        Err(e) => {
            error!("cannot read script: {}", e);
            std::process::exit(1);
        }
    };

    // The simulated chip always answers on the configured address.
    let i2c_bus = RefCell::new(SimPca9685::new(config.shield_address));
    let mut shield = match MotorShield::new(&i2c_bus, &config) {
        Ok(shield) => shield,
        Err(e) => {
            error!("motor shield setup failed: {:?}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = shield.begin() {
        error!("motor shield init failed: {:?}", e);
        std::process::exit(1);
    }

    info!(
        debug_baud = DEBUG_BAUDRATE,
        controller_baud = CONTROLLER_BAUDRATE,
        version = VERSION,
        "simulated serial channels ready"
    );

    let mut controller = Controller::new(port, shield, DebugConsole::new(), config);
    controller.setup();

    loop {
        match controller.poll() {
            Ok(Some(outcome)) => {
                if opts.state_json && !matches!(outcome, Outcome::Rejected(_)) {
                    let wheels = i2c_bus.borrow().wheels(&config);
                    match serde_json::to_string(&wheels) {
                        Ok(json) => eprintln!("{}", json),
                        Err(e) => error!("state serialization failed: {}", e),
                    }
                }
            }
            Ok(None) => {
                if controller.port().is_finished() {
                    info!("command channel closed");
                    break;
                }
                if !controller.port_mut().read_ready().unwrap_or(false) {
                    std::thread::sleep(Duration::from_millis(1));
                }
            }
            Err(e) => error!("command loop fault: {:?}", e),
        }
    }
}
