//! Keypad debounce state machine.
//!
//! Mechanical keys bounce: a single press reads as a burst of make/break
//! flicker on the scan lines. The debouncer runs over successive scans and
//! reports each physical press exactly once, at the moment the key is
//! released. Release, not press, is when a digit counts, so a held key can
//! never auto-repeat into the code entry.
//!
//! # States
//!
//! - `Scanning`: idle, watching for any key to appear.
//! - `Debouncing`: a key was seen; wait out the debounce threshold, then
//!   re-scan to confirm it was a real press and not flicker.
//! - `HeldPressed`: press confirmed; watch for the key to disappear.
//!
//! The machine is ticked by the caller once per fixed time increment and
//! counts those ticks; it never reads a wall clock.

use crate::scanner::KeySource;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use vigia_core::Key;
use vigia_core::constants::{DEBOUNCE_THRESHOLD_MS, TICK_INCREMENT_MS};
use vigia_hardware::Result;

/// State of the debounce machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebounceState {
    /// Idle; no key seen.
    Scanning,

    /// Key detected; waiting out the debounce threshold.
    Debouncing,

    /// Press confirmed stable; waiting for release.
    HeldPressed,
}

/// Debounces a [`KeySource`] into clean key-release events.
///
/// `update()` must be called once per tick increment; it returns
/// `Some(key)` exactly once per physical press, on the tick where the
/// release is observed, and `None` on every other tick.
///
/// # Examples
///
/// ```
/// use vigia_core::Key;
/// use vigia_keypad::{KeypadDebouncer, ScriptedKeys};
///
/// let mut keys = ScriptedKeys::new([]);
/// keys.tap(Key::Digit(5));
///
/// let mut debouncer = KeypadDebouncer::new(keys);
/// let mut events = Vec::new();
/// for _ in 0..20 {
///     if let Some(key) = debouncer.update().unwrap() {
///         events.push(key);
///     }
/// }
/// assert_eq!(events, vec![Key::Digit(5)]);
/// ```
#[derive(Debug)]
pub struct KeypadDebouncer<S: KeySource> {
    source: S,
    state: DebounceState,

    /// Symbol captured when debouncing began; the comparison key through
    /// `HeldPressed`.
    last_detected: Option<Key>,

    /// Milliseconds accumulated since entering `Debouncing`.
    elapsed_ms: u32,

    tick_ms: u32,
    threshold_ms: u32,
}

impl<S: KeySource> KeypadDebouncer<S> {
    /// Create a debouncer with the default tick and threshold timing.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_timing(source, TICK_INCREMENT_MS, DEBOUNCE_THRESHOLD_MS)
    }

    /// Create a debouncer with custom timing, in milliseconds.
    ///
    /// `tick_ms` is the increment accumulated per `update()` call;
    /// `threshold_ms` is how long a key must stay stable to be trusted.
    #[must_use]
    pub fn with_timing(source: S, tick_ms: u32, threshold_ms: u32) -> Self {
        Self {
            source,
            state: DebounceState::Scanning,
            last_detected: None,
            elapsed_ms: 0,
            tick_ms,
            threshold_ms,
        }
    }

    /// Current machine state.
    #[must_use]
    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// The wrapped key source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the wrapped key source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Advance the machine by one tick.
    ///
    /// Returns `Some(key)` exactly once per physical press, on the tick
    /// where the release is observed; `None` otherwise. Bounce that
    /// reverts before the threshold is absorbed without any event.
    ///
    /// # Errors
    /// Propagates scan failures from the key source; the machine state is
    /// left unchanged by a failed scan.
    pub fn update(&mut self) -> Result<Option<Key>> {
        match self.state {
            DebounceState::Scanning => {
                if let Some(key) = self.source.scan()? {
                    self.last_detected = Some(key);
                    self.elapsed_ms = 0;
                    self.state = DebounceState::Debouncing;
                    trace!(%key, "key detected, debouncing");
                }
                Ok(None)
            }

            DebounceState::Debouncing => {
                if self.elapsed_ms >= self.threshold_ms {
                    let sample = self.source.scan()?;
                    if sample == self.last_detected {
                        self.state = DebounceState::HeldPressed;
                        trace!(key = ?self.last_detected, "press confirmed");
                    } else {
                        // Flicker: the key did not survive the threshold.
                        self.state = DebounceState::Scanning;
                        trace!("bounce discarded");
                    }
                }
                // The timer advances one tick per call on every branch.
                self.elapsed_ms += self.tick_ms;
                Ok(None)
            }

            DebounceState::HeldPressed => {
                let sample = self.source.scan()?;
                if sample == self.last_detected {
                    return Ok(None);
                }
                self.state = DebounceState::Scanning;
                if sample.is_none() {
                    // Fully released, not swapped to another key.
                    let released = self.last_detected.take();
                    if let Some(key) = released {
                        debug!(%key, "key released");
                    }
                    return Ok(released);
                }
                Ok(None)
            }
        }
    }

    /// Force the machine back to `Scanning`, discarding any press in
    /// flight. Recovery hook; never required in the normal cycle.
    pub fn reset(&mut self) {
        self.state = DebounceState::Scanning;
        self.last_detected = None;
        self.elapsed_ms = 0;
    }
}
