use crate::{Result, error::Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;

/// A symbol on the 4x4 matrix keypad.
///
/// The alphabet has sixteen symbols: the digits `0`-`9`, the auxiliary keys
/// `A`-`D`, and `*`/`#`. "No key pressed" is represented as
/// `Option::<Key>::None` throughout the workspace, never as a sentinel
/// symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Numeric digit (0-9).
    Digit(u8),

    /// Auxiliary key A (begin-entry key in the default layout).
    A,

    /// Auxiliary key B.
    B,

    /// Auxiliary key C.
    C,

    /// Auxiliary key D.
    D,

    /// Star key (*).
    Star,

    /// Hash/pound key (#).
    Hash,
}

impl Key {
    /// Create a digit key with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidDigit` if the digit is greater than 9.
    ///
    /// # Examples
    ///
    /// ```
    /// use vigia_core::Key;
    ///
    /// let key = Key::digit(5).unwrap();
    /// assert_eq!(key.as_digit(), Some(5));
    ///
    /// assert!(Key::digit(10).is_err());
    /// ```
    pub fn digit(d: u8) -> Result<Self> {
        if d > 9 {
            return Err(Error::InvalidDigit(d));
        }
        Ok(Self::Digit(d))
    }

    /// Parse a key from its keypad legend character.
    ///
    /// # Errors
    /// Returns `Error::InvalidKey` for any character outside the 16-symbol
    /// alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use vigia_core::Key;
    ///
    /// assert_eq!(Key::from_char('7').unwrap(), Key::Digit(7));
    /// assert_eq!(Key::from_char('*').unwrap(), Key::Star);
    /// assert!(Key::from_char('x').is_err());
    /// ```
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            '0'..='9' => Ok(Self::Digit(c as u8 - b'0')),
            'A' => Ok(Self::A),
            'B' => Ok(Self::B),
            'C' => Ok(Self::C),
            'D' => Ok(Self::D),
            '*' => Ok(Self::Star),
            '#' => Ok(Self::Hash),
            _ => Err(Error::InvalidKey(c)),
        }
    }

    /// Get the keypad legend character for this key.
    #[must_use]
    pub fn as_char(&self) -> char {
        match self {
            Self::Digit(d) => (b'0' + d) as char,
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::Star => '*',
            Self::Hash => '#',
        }
    }

    /// Check if this key is a digit.
    #[must_use]
    pub fn is_digit(&self) -> bool {
        matches!(self, Self::Digit(_))
    }

    /// Get the digit value if this is a digit key.
    #[must_use]
    pub fn as_digit(&self) -> Option<u8> {
        match self {
            Self::Digit(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl std::str::FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Key::from_char(c),
            _ => Err(Error::InvalidKey(s.chars().next().unwrap_or('\0'))),
        }
    }
}

/// The fixed ordered key sequence required to unlock the door.
///
/// Configured once at startup and immutable at runtime.
///
/// # Security
/// Entered sequences are compared in constant time to avoid leaking, through
/// timing, the position of the first wrong key.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct AccessCode(Vec<Key>);

impl AccessCode {
    /// Create a new access code with validation.
    ///
    /// # Errors
    /// Returns `Error::EmptyAccessCode` if the sequence is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use vigia_core::{AccessCode, Key};
    ///
    /// let code = AccessCode::new(vec![Key::Digit(1), Key::Digit(4), Key::Digit(7)]).unwrap();
    /// assert_eq!(code.len(), 3);
    ///
    /// assert!(AccessCode::new(vec![]).is_err());
    /// ```
    pub fn new(keys: Vec<Key>) -> Result<Self> {
        if keys.is_empty() {
            return Err(Error::EmptyAccessCode);
        }
        Ok(AccessCode(keys))
    }

    /// Parse an access code from keypad legend characters, e.g. `"147"`.
    ///
    /// # Errors
    /// Returns `Error::InvalidKey` for characters outside the keypad
    /// alphabet and `Error::EmptyAccessCode` for an empty string.
    pub fn parse(s: &str) -> Result<Self> {
        let keys = s.chars().map(Key::from_char).collect::<Result<Vec<_>>>()?;
        Self::new(keys)
    }

    /// Number of keys in the code.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the code keys in order.
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    /// Compare an entered sequence against this code in constant time.
    ///
    /// A length mismatch is a non-match; equal-length sequences are compared
    /// without short-circuiting on the first differing key.
    ///
    /// # Examples
    ///
    /// ```
    /// use vigia_core::{AccessCode, Key};
    ///
    /// let code = AccessCode::parse("147").unwrap();
    /// assert!(code.matches(&[Key::Digit(1), Key::Digit(4), Key::Digit(7)]));
    /// assert!(!code.matches(&[Key::Digit(1), Key::Digit(4), Key::Digit(8)]));
    /// assert!(!code.matches(&[Key::Digit(1), Key::Digit(4)]));
    /// ```
    #[must_use]
    pub fn matches(&self, entered: &[Key]) -> bool {
        let expected: Vec<u8> = self.0.iter().map(|k| k.as_char() as u8).collect();
        let actual: Vec<u8> = entered.iter().map(|k| k.as_char() as u8).collect();
        expected.ct_eq(&actual).into()
    }
}

/// Constant-time comparison implementation for AccessCode
impl PartialEq for AccessCode {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.0)
    }
}

impl fmt::Display for AccessCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Codes are not printed in logs; Display exists for diagnostics and
        // deliberately masks the keys.
        write!(f, "{}", "*".repeat(self.0.len()))
    }
}

impl std::str::FromStr for AccessCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AccessCode::parse(s)
    }
}

/// Closed interval of hours `[start, end]` during which code entry is
/// permitted, in 24-hour wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    start: u8,
    end: u8,
}

impl HourWindow {
    /// Create a new hour window with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidHour` if either bound is above 23, or
    /// `Error::InvalidHourWindow` if `start > end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vigia_core::HourWindow;
    ///
    /// let window = HourWindow::new(8, 16).unwrap();
    /// assert!(window.contains(8));
    /// assert!(window.contains(16));
    /// assert!(!window.contains(17));
    ///
    /// assert!(HourWindow::new(16, 8).is_err());
    /// assert!(HourWindow::new(0, 24).is_err());
    /// ```
    pub fn new(start: u8, end: u8) -> Result<Self> {
        for hour in [start, end] {
            if hour > 23 {
                return Err(Error::InvalidHour(hour));
            }
        }
        if start > end {
            return Err(Error::InvalidHourWindow { start, end });
        }
        Ok(HourWindow { start, end })
    }

    /// First permitted hour (inclusive).
    #[must_use]
    pub fn start(&self) -> u8 {
        self.start
    }

    /// Last permitted hour (inclusive).
    #[must_use]
    pub fn end(&self) -> u8 {
        self.end
    }

    /// Check whether an hour of day falls inside the window, both ends
    /// inclusive.
    #[must_use]
    pub fn contains(&self, hour: u8) -> bool {
        (self.start..=self.end).contains(&hour)
    }
}

impl fmt::Display for HourWindow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{:02}h, {:02}h]", self.start, self.end)
    }
}

/// State of the door-access state machine.
///
/// Lifecycle: initialized to `Closed` at startup; a correct code entry moves
/// it to `Unlocked`, the door handle opening moves it to `Open`, and the
/// handle closing again returns it to `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorState {
    /// Door locked, waiting for the begin-entry key.
    Closed,

    /// Code accepted; door unlocked but not yet opened.
    Unlocked,

    /// Door handle operated; door physically open.
    Open,
}

impl DoorState {
    /// Check if transition to target state is valid from this state.
    ///
    /// The door cycle is a ring: `Closed -> Unlocked -> Open -> Closed`.
    /// Defensive recovery (reset to `Closed` from anywhere) goes through
    /// the controller's reset path, not through a regular transition.
    ///
    /// # Examples
    ///
    /// ```
    /// use vigia_core::DoorState;
    ///
    /// assert!(DoorState::Closed.can_transition_to(DoorState::Unlocked));
    /// assert!(!DoorState::Closed.can_transition_to(DoorState::Open));
    /// ```
    #[must_use]
    pub fn can_transition_to(&self, target: DoorState) -> bool {
        matches!(
            (self, target),
            (DoorState::Closed, DoorState::Unlocked)
                | (DoorState::Unlocked, DoorState::Open)
                | (DoorState::Open, DoorState::Closed)
        )
    }
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let state_str = match self {
            DoorState::Closed => "Closed",
            DoorState::Unlocked => "Unlocked",
            DoorState::Open => "Open",
        };
        write!(f, "{}", state_str)
    }
}
