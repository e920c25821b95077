//! Mock keypad matrix for testing and development.

use crate::{Result, error::HardwareError, traits::KeypadBus};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct KeypadShared {
    /// Key currently held down, as (row, column), if any. The mock models a
    /// single simultaneous press, which is all the scan contract reports.
    pressed: Option<(usize, usize)>,
}

/// Mock row/column matrix for a keypad.
///
/// The bus half tracks which row the scanner is currently driving; a column
/// reads active exactly when the pressed key sits at (driven row, column),
/// mirroring how a real matrix closes the circuit.
///
/// # Examples
///
/// ```
/// use vigia_hardware::mock::MockKeypadBus;
/// use vigia_hardware::traits::KeypadBus;
///
/// let (mut bus, handle) = MockKeypadBus::new(4, 4);
/// handle.press(1, 2).unwrap();
///
/// bus.drive_row(1, true).unwrap();
/// assert!(bus.column_active(2).unwrap());
/// assert!(!bus.column_active(0).unwrap());
///
/// bus.drive_row(1, false).unwrap();
/// assert!(!bus.column_active(2).unwrap());
/// ```
#[derive(Debug)]
pub struct MockKeypadBus {
    shared: Arc<Mutex<KeypadShared>>,
    active_row: Option<usize>,
    rows: usize,
    cols: usize,
}

impl MockKeypadBus {
    /// Create a mock bus for a matrix of the given geometry.
    ///
    /// Returns a (bus, handle) pair; the handle simulates physical presses.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> (Self, MockKeypadHandle) {
        let shared = Arc::new(Mutex::new(KeypadShared::default()));
        let bus = Self {
            shared: Arc::clone(&shared),
            active_row: None,
            rows,
            cols,
        };
        let handle = MockKeypadHandle { shared, rows, cols };
        (bus, handle)
    }

    fn shared(&self) -> MutexGuard<'_, KeypadShared> {
        self.shared
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl KeypadBus for MockKeypadBus {
    fn drive_row(&mut self, row: usize, active: bool) -> Result<()> {
        if row >= self.rows {
            return Err(HardwareError::row_out_of_range(row, self.rows));
        }
        if active {
            self.active_row = Some(row);
        } else if self.active_row == Some(row) {
            self.active_row = None;
        }
        Ok(())
    }

    fn column_active(&self, col: usize) -> Result<bool> {
        if col >= self.cols {
            return Err(HardwareError::column_out_of_range(col, self.cols));
        }
        let pressed = self.shared().pressed;
        Ok(matches!(
            (pressed, self.active_row),
            (Some((r, c)), Some(active)) if r == active && c == col
        ))
    }
}

/// Handle for simulating key presses on a [`MockKeypadBus`].
///
/// Can be cloned and moved to another task; presses become visible to the
/// bus on its next scan.
#[derive(Debug, Clone)]
pub struct MockKeypadHandle {
    shared: Arc<Mutex<KeypadShared>>,
    rows: usize,
    cols: usize,
}

impl MockKeypadHandle {
    /// Press (and hold) the key at the given matrix position, replacing any
    /// previously held key.
    ///
    /// # Errors
    /// Returns an error if the position is outside the matrix geometry.
    pub fn press(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows {
            return Err(HardwareError::row_out_of_range(row, self.rows));
        }
        if col >= self.cols {
            return Err(HardwareError::column_out_of_range(col, self.cols));
        }
        self.shared().pressed = Some((row, col));
        Ok(())
    }

    /// Release whatever key is held, if any.
    pub fn release(&self) {
        self.shared().pressed = None;
    }

    /// Key currently held, as (row, column).
    #[must_use]
    pub fn pressed(&self) -> Option<(usize, usize)> {
        self.shared().pressed
    }

    fn shared(&self) -> MutexGuard<'_, KeypadShared> {
        self.shared
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
