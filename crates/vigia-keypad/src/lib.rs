//! Matrix keypad scanning and debouncing.
//!
//! This crate turns raw row/column pin levels into clean key-release events
//! in two stages:
//!
//! 1. [`MatrixScanner`] samples the matrix through a
//!    [`KeypadBus`](vigia_hardware::KeypadBus) and reports which key (if
//!    any) is currently down: a pure poll, one answer per call.
//! 2. [`KeypadDebouncer`] wraps any [`KeySource`] and runs the three-state
//!    debounce machine over successive polls, emitting each physical press
//!    exactly once, at the moment the key is released.
//!
//! The [`KeySource`] trait is the seam between the two stages: production
//! code plugs in the scanner, tests plug in [`ScriptedKeys`].

pub mod debouncer;
pub mod layout;
pub mod scanner;
pub mod script;

pub use debouncer::{DebounceState, KeypadDebouncer};
pub use layout::KeyLayout;
pub use scanner::{KeySource, MatrixScanner};
pub use script::ScriptedKeys;
