//! Module Exports
//!
//! Serial-side plumbing for the actor firmware.
//!
//! # Modules
//! - `line`: accumulates command bytes until a terminator arrives.
//! - `serial`: non-blocking byte polling on the command channel.
//! - `console`: line-oriented writer for the diagnostic channel.

pub mod console;
pub mod line;
pub mod serial;

pub use console::Console;
pub use line::{Frame, LineBuffer};
