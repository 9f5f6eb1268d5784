//! ASCII command protocol spoken on the command channel.
//!
//! ```text
//! S          stop all motors
//! MxxDySzz   xx = FL, FR, RL, RR; y = F, B; zz = 00..99 percent
//! V          reply with V<version>;
//! ```
//!
//! Every command is terminated by `;`, several may share one transmission.

pub mod error;
pub mod messages;
pub mod parser;

pub use error::CommandError;
pub use messages::{Command, Direction, DirectionParsing, Drive, MotorCommand, Position};
pub use parser::parse;
