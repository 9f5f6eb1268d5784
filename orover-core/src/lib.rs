//! Serial command parser and motor dispatcher for the oRover actor board.
//!
//! The host (a Raspberry Pi running the web controller) sends `;`-terminated
//! ASCII commands over a serial link; this crate turns them into speed and
//! direction updates for four DC motors.
//!
//! For a runnable host simulation, see `orover-app/mock-mcu`.
#![cfg_attr(not(test), no_std)]

pub mod utils;
