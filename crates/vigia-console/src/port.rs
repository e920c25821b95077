//! Text port abstraction and its scripted mock.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use vigia_hardware::{HardwareError, Result};

/// A character-oriented serial port as the console sees it.
///
/// Command dispatch uses the non-blocking [`read_char`]; the interactive
/// set-time dialogue uses the blocking, bounded [`read_line`]. Everything the
/// console prints goes through [`write_str`].
///
/// [`read_char`]: TextPort::read_char
/// [`read_line`]: TextPort::read_line
/// [`write_str`]: TextPort::write_str
pub trait TextPort {
    /// Read one character if any is pending, without blocking.
    ///
    /// # Errors
    /// Returns an error if the port is unusable.
    fn read_char(&mut self) -> Result<Option<char>>;

    /// Read a line, blocking until a newline arrives or `max_len`
    /// characters have been read. The newline is consumed but not returned.
    ///
    /// # Errors
    /// Returns an error if the port is unusable.
    fn read_line(&mut self, max_len: usize) -> Result<String>;

    /// Write text to the port.
    ///
    /// # Errors
    /// Returns an error if the port is unusable.
    fn write_str(&mut self, s: &str) -> Result<()>;
}

#[derive(Debug, Default)]
struct PortShared {
    input: VecDeque<char>,
    output: String,
}

/// In-memory [`TextPort`] driven from a test or demo.
///
/// The port half goes to the console; the handle half feeds input and reads
/// back everything the console printed. A blocking `read_line` with no
/// newline queued fails instead of hanging, so a test with a short script
/// dies with an error rather than a timeout.
///
/// # Examples
///
/// ```
/// use vigia_console::{MockPort, TextPort};
///
/// let (mut port, handle) = MockPort::new();
/// handle.push_str("t");
///
/// assert_eq!(port.read_char().unwrap(), Some('t'));
/// assert_eq!(port.read_char().unwrap(), None);
///
/// port.write_str("hello").unwrap();
/// assert_eq!(handle.output(), "hello");
/// ```
#[derive(Debug)]
pub struct MockPort {
    shared: Arc<Mutex<PortShared>>,
}

impl MockPort {
    /// Create an empty port plus its driver handle.
    #[must_use]
    pub fn new() -> (Self, MockPortHandle) {
        let shared = Arc::new(Mutex::new(PortShared::default()));
        let port = Self {
            shared: Arc::clone(&shared),
        };
        (port, MockPortHandle { shared })
    }

    fn shared(&self) -> MutexGuard<'_, PortShared> {
        self.shared
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl TextPort for MockPort {
    fn read_char(&mut self) -> Result<Option<char>> {
        Ok(self.shared().input.pop_front())
    }

    fn read_line(&mut self, max_len: usize) -> Result<String> {
        let mut shared = self.shared();
        let mut line = String::new();
        loop {
            let Some(c) = shared.input.pop_front() else {
                return Err(HardwareError::other("port input script exhausted"));
            };
            if c == '\n' {
                return Ok(line);
            }
            line.push(c);
            if line.len() >= max_len {
                return Ok(line);
            }
        }
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.shared().output.push_str(s);
        Ok(())
    }
}

/// Driver handle for a [`MockPort`].
#[derive(Debug, Clone)]
pub struct MockPortHandle {
    shared: Arc<Mutex<PortShared>>,
}

impl MockPortHandle {
    /// Queue characters as pending input.
    pub fn push_str(&self, s: &str) {
        self.shared().input.extend(s.chars());
    }

    /// Queue a line of input, newline included.
    pub fn push_line(&self, s: &str) {
        self.push_str(s);
        self.shared().input.push_back('\n');
    }

    /// Everything written to the port so far.
    #[must_use]
    pub fn output(&self) -> String {
        self.shared().output.clone()
    }

    /// Forget the captured output.
    pub fn clear_output(&self) {
        self.shared().output.clear();
    }

    fn shared(&self) -> MutexGuard<'_, PortShared> {
        self.shared
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
