//! Matrix keypad scanner.

use crate::layout::KeyLayout;
use vigia_core::Key;
use vigia_core::constants::{KEYPAD_COLS, KEYPAD_ROWS};
use vigia_hardware::{KeypadBus, Result};

/// Anything that can report which key (if any) is currently down.
///
/// This is the exact contract the debouncer consumes: one non-blocking
/// sample per call, `None` when no key is pressed. Production code uses
/// [`MatrixScanner`]; tests use [`ScriptedKeys`](crate::ScriptedKeys).
pub trait KeySource {
    /// Sample the keypad once.
    ///
    /// # Errors
    /// Returns an error if the underlying pin access fails.
    fn scan(&mut self) -> Result<Option<Key>>;
}

/// Polls a keypad matrix one row at a time.
///
/// Each scan drives every row line active in turn (all others inactive) and
/// reads all column lines while that row is active; the first active column
/// in row-major order identifies the pressed key through the layout table.
/// The scanner holds no state between calls beyond the bus itself.
///
/// # Examples
///
/// ```
/// use vigia_hardware::mock::MockKeypadBus;
/// use vigia_keypad::{KeySource, MatrixScanner};
/// use vigia_core::Key;
///
/// let (bus, handle) = MockKeypadBus::new(4, 4);
/// let mut scanner = MatrixScanner::new(bus);
///
/// assert_eq!(scanner.scan().unwrap(), None);
///
/// handle.press(1, 0).unwrap(); // the "4" key
/// assert_eq!(scanner.scan().unwrap(), Some(Key::Digit(4)));
/// ```
#[derive(Debug)]
pub struct MatrixScanner<B: KeypadBus> {
    bus: B,
    layout: KeyLayout,
}

impl<B: KeypadBus> MatrixScanner<B> {
    /// Create a scanner with the standard keypad legend.
    #[must_use]
    pub fn new(bus: B) -> Self {
        Self::with_layout(bus, KeyLayout::standard())
    }

    /// Create a scanner with a custom legend.
    #[must_use]
    pub fn with_layout(bus: B, layout: KeyLayout) -> Self {
        Self { bus, layout }
    }

    /// The layout table in use.
    #[must_use]
    pub fn layout(&self) -> &KeyLayout {
        &self.layout
    }
}

impl<B: KeypadBus> KeySource for MatrixScanner<B> {
    fn scan(&mut self) -> Result<Option<Key>> {
        for row in 0..KEYPAD_ROWS {
            for r in 0..KEYPAD_ROWS {
                self.bus.drive_row(r, r == row)?;
            }
            for col in 0..KEYPAD_COLS {
                if self.bus.column_active(col)? {
                    return Ok(self.layout.key_at(row, col));
                }
            }
        }
        Ok(None)
    }
}
