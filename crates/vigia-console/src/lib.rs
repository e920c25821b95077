//! Serial maintenance console.
//!
//! A single-character command interface over a text port: `t` prints the
//! controller's wall-clock time, `s` walks the operator through setting it
//! field by field. The console polls its port once per call and never touches
//! the door; it shares a clock with the door controller so a time set here is
//! immediately visible to the hour-window gate.

pub mod command;
pub mod port;

pub use command::Console;
pub use port::{MockPort, MockPortHandle, TextPort};
