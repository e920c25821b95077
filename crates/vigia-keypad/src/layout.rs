//! Physical (row, column) to key-symbol mapping.

use vigia_core::Key;
use vigia_core::constants::{KEYPAD_COLS, KEYPAD_ROWS};

/// The usual 4x4 membrane keypad legend.
const STANDARD: [[Key; KEYPAD_COLS]; KEYPAD_ROWS] = [
    [Key::Digit(1), Key::Digit(2), Key::Digit(3), Key::A],
    [Key::Digit(4), Key::Digit(5), Key::Digit(6), Key::B],
    [Key::Digit(7), Key::Digit(8), Key::Digit(9), Key::C],
    [Key::Star, Key::Digit(0), Key::Hash, Key::D],
];

/// Fixed row-major lookup table mapping a matrix position to its key.
///
/// # Examples
///
/// ```
/// use vigia_keypad::KeyLayout;
/// use vigia_core::Key;
///
/// let layout = KeyLayout::standard();
/// assert_eq!(layout.key_at(0, 3), Some(Key::A));
/// assert_eq!(layout.key_at(3, 1), Some(Key::Digit(0)));
/// assert_eq!(layout.key_at(4, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLayout {
    keys: [[Key; KEYPAD_COLS]; KEYPAD_ROWS],
}

impl KeyLayout {
    /// Layout of the standard 1-2-3-A / 4-5-6-B / 7-8-9-C / *-0-#-D keypad.
    #[must_use]
    pub fn standard() -> Self {
        Self { keys: STANDARD }
    }

    /// Layout with a custom legend.
    #[must_use]
    pub fn new(keys: [[Key; KEYPAD_COLS]; KEYPAD_ROWS]) -> Self {
        Self { keys }
    }

    /// Key at a matrix position, or `None` outside the geometry.
    #[must_use]
    pub fn key_at(&self, row: usize, col: usize) -> Option<Key> {
        self.keys.get(row)?.get(col).copied()
    }

    /// Matrix position of a key, or `None` if the legend does not carry it.
    #[must_use]
    pub fn position_of(&self, key: Key) -> Option<(usize, usize)> {
        self.keys.iter().enumerate().find_map(|(row, cols)| {
            cols.iter()
                .position(|&k| k == key)
                .map(|col| (row, col))
        })
    }
}

impl Default for KeyLayout {
    fn default() -> Self {
        Self::standard()
    }
}
