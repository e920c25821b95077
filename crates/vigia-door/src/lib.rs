//! Door-access state machine.
//!
//! [`DoorController`] consumes debounced key-release events and the
//! door-handle sensor to manage the lock: a begin-entry key inside the
//! permitted hour window starts a code-capture sequence, a correct code
//! unlocks the door, and the handle sensor walks it through
//! `Unlocked -> Open -> Closed`.

pub mod controller;

pub use controller::DoorController;
