//! Compile-time configuration for the door-lock controller.
//!
//! The controller has no configuration files or persisted settings; every
//! tunable is a constant in this module, centralized so that keypad geometry,
//! timing, and the default access policy stay consistent across crates.
//!
//! # Timing model
//!
//! The state machines are tick-driven: the main loop calls them once per
//! [`TICK_INCREMENT_MS`] and the debounce timer accumulates that increment
//! per call. Timing constants are therefore expressed in milliseconds but
//! measured in ticks, not wall time.
//!
//! ```
//! use vigia_core::constants::{DEBOUNCE_THRESHOLD_MS, TICK_INCREMENT_MS};
//!
//! // Number of ticks a key must stay stable before it is trusted.
//! let ticks = DEBOUNCE_THRESHOLD_MS / TICK_INCREMENT_MS;
//! assert_eq!(ticks, 4);
//! ```

use crate::types::Key;

// ============================================================================
// Keypad geometry
// ============================================================================

/// Number of row lines on the matrix keypad.
pub const KEYPAD_ROWS: usize = 4;

/// Number of column lines on the matrix keypad.
pub const KEYPAD_COLS: usize = 4;

// ============================================================================
// Timing
// ============================================================================

/// Nominal duration of one main-loop tick, in milliseconds.
///
/// The debouncer accumulates this increment once per update call; the main
/// loop is responsible for calling it at roughly this cadence.
pub const TICK_INCREMENT_MS: u32 = 10;

/// Time a detected key must remain stable before it is confirmed, in
/// milliseconds.
pub const DEBOUNCE_THRESHOLD_MS: u32 = 40;

/// How long the incorrect-code indicator stays lit after a failed entry,
/// in milliseconds.
pub const INCORRECT_CODE_FLASH_MS: u32 = 1000;

// ============================================================================
// Access policy defaults
// ============================================================================

/// Number of keys in the access code.
pub const CODE_DIGITS: usize = 3;

/// Default access code, entered after the begin-entry key.
pub const DEFAULT_CODE: [Key; CODE_DIGITS] = [Key::Digit(1), Key::Digit(4), Key::Digit(7)];

/// Key that starts a code-entry sequence.
pub const BEGIN_ENTRY_KEY: Key = Key::A;

/// First hour of the day (inclusive) during which code entry is permitted.
pub const DEFAULT_START_HOUR: u8 = 8;

/// Last hour of the day (inclusive) during which code entry is permitted.
pub const DEFAULT_END_HOUR: u8 = 16;
