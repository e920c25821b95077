//! Core domain types for the vigia door-lock controller.
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace: keypad symbols, the access code, the permitted hour window,
//! the door state, the compile-time configuration constants, and the error
//! taxonomy.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
