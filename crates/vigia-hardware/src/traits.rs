//! Hardware peripheral trait definitions.
//!
//! These traits establish the contract between the controller core and its
//! peripherals (keypad matrix lines, door-handle sensor, indicator lamps,
//! wall clock), enabling substitution between mock and real pin drivers.
//!
//! All methods are synchronous: the controller samples pins once per tick
//! and never blocks on a peripheral.

use crate::error::Result;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Row/column line access for a matrix keypad.
///
/// The scanner drives one row line active at a time and reads every column
/// line while that row is active; a key at (row, column) connects the two
/// lines, so its column reads active exactly while its row is driven.
///
/// Implementations map "active" to whatever the electrical wiring needs
/// (the usual pull-up wiring is active-low); callers only see the logical
/// level.
pub trait KeypadBus {
    /// Drive a row line active or inactive.
    ///
    /// # Errors
    /// Returns an error if the row index is outside the wired matrix or the
    /// pin write fails.
    fn drive_row(&mut self, row: usize, active: bool) -> Result<()>;

    /// Read a column line, `true` meaning active.
    ///
    /// # Errors
    /// Returns an error if the column index is outside the wired matrix or
    /// the pin read fails.
    fn column_active(&self, col: usize) -> Result<bool>;
}

/// Door-handle sensor.
pub trait DoorSensor {
    /// Read the sensor, `true` meaning the door is physically open.
    ///
    /// # Errors
    /// Returns an error if the pin read fails.
    fn is_open(&self) -> Result<bool>;
}

/// Indicator lamps on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// Lit while the door is unlocked.
    Unlocked,

    /// Lit while the door is locked.
    Locked,

    /// Pulsed after a failed code entry.
    IncorrectCode,
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Indicator::Unlocked => "unlocked",
            Indicator::Locked => "locked",
            Indicator::IncorrectCode => "incorrect-code",
        };
        write!(f, "{}", name)
    }
}

/// Indicator lamp outputs.
pub trait IndicatorPanel {
    /// Switch an indicator lamp on or off.
    ///
    /// # Errors
    /// Returns an error if the pin write fails.
    fn set_indicator(&mut self, indicator: Indicator, on: bool) -> Result<()>;
}

/// Wall-clock source.
///
/// Consulted synchronously by the door controller at the moment a
/// code-entry sequence begins, to gate entry to the permitted hour window.
pub trait Clock {
    /// Current local wall-clock time.
    fn now(&self) -> DateTime<Local>;
}

/// A clock whose wall-clock time can be set at runtime.
///
/// Consumed by the serial console's set-time command. Implementations are
/// expected to be cheaply cloneable so the console and the door controller
/// can observe the same time base.
pub trait SettableClock: Clock {
    /// Set the wall-clock time.
    ///
    /// # Errors
    /// Returns an error if the underlying time base cannot be adjusted.
    fn set(&mut self, to: DateTime<Local>) -> Result<()>;
}
