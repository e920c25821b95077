//! Scripted scan sequences.
//!
//! [`ScriptedKeys`] replays a prepared list of scan frames through the
//! [`KeySource`] contract. It exists for tests and demos that need exact
//! control over what the debouncer sees on every poll, including bounce
//! flicker that no mock pin matrix would produce on cue.

use crate::scanner::KeySource;
use std::collections::VecDeque;
use vigia_core::Key;
use vigia_hardware::{HardwareError, Result};

/// A [`KeySource`] that replays prepared scan frames in order.
///
/// One frame is consumed per `scan()` call. After the script runs out, the
/// source either reads as an idle keypad (`None` forever, the default) or
/// fails every scan (`strict`), which turns a test that would spin forever
/// into an immediate error.
///
/// # Examples
///
/// ```
/// use vigia_core::Key;
/// use vigia_keypad::{KeySource, ScriptedKeys};
///
/// let mut keys = ScriptedKeys::new([Some(Key::Digit(5)), None]);
/// assert_eq!(keys.scan().unwrap(), Some(Key::Digit(5)));
/// assert_eq!(keys.scan().unwrap(), None);
/// assert_eq!(keys.scan().unwrap(), None); // idle after exhaustion
/// ```
#[derive(Debug)]
pub struct ScriptedKeys {
    frames: VecDeque<Option<Key>>,
    strict: bool,
    consumed: usize,
}

impl ScriptedKeys {
    /// Script that reads as an idle keypad once exhausted.
    #[must_use]
    pub fn new(frames: impl IntoIterator<Item = Option<Key>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            strict: false,
            consumed: 0,
        }
    }

    /// Script that errors once exhausted.
    ///
    /// Use this when the code under test polls in a loop: running off the
    /// end of the script fails the scan instead of spinning.
    #[must_use]
    pub fn strict(frames: impl IntoIterator<Item = Option<Key>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            strict: true,
            consumed: 0,
        }
    }

    /// Append a single frame.
    pub fn push(&mut self, frame: Option<Key>) {
        self.frames.push_back(frame);
    }

    /// Append the frames of one clean press-and-release of `key`.
    ///
    /// Three scans reach the source per keystroke: detection, debounce
    /// confirmation, and the release read (the debounce wait itself
    /// consumes ticks, not scans).
    pub fn tap(&mut self, key: Key) {
        self.push(Some(key));
        self.push(Some(key));
        self.push(None);
    }

    /// Frames consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Frames still queued.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl KeySource for ScriptedKeys {
    fn scan(&mut self) -> Result<Option<Key>> {
        match self.frames.pop_front() {
            Some(frame) => {
                self.consumed += 1;
                Ok(frame)
            }
            None if self.strict => Err(HardwareError::other("key script exhausted")),
            None => Ok(None),
        }
    }
}
