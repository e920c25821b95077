//! Console command dispatch and the interactive set-time dialogue.

use crate::port::TextPort;
use chrono::{Local, TimeZone};
use tracing::{info, warn};
use vigia_core::Error;
use vigia_hardware::{Result, SettableClock};

/// Longest sensible numeric field; anything past this is cut off.
const FIELD_MAX_LEN: usize = 8;

/// Single-character command console over a [`TextPort`].
///
/// [`poll`] is meant to be called from the same cooperative loop that ticks
/// the door controller: it services at most one pending command per call and
/// returns immediately when no input is waiting. The exception is the
/// set-time dialogue, which blocks on the port line by line until the
/// operator has answered every prompt or given an unusable answer.
///
/// Operator mistakes (a malformed number, February 30th) are reported on the
/// port and end the command; they are never surfaced as errors to the loop.
///
/// [`poll`]: Console::poll
#[derive(Debug)]
pub struct Console<P: TextPort, C: SettableClock> {
    port: P,
    clock: C,
}

impl<P: TextPort, C: SettableClock> Console<P, C> {
    /// Create a console over the given port and clock.
    ///
    /// The clock should be a clone of the one the door controller reads, so
    /// a time set here moves the hour-window gate as well.
    pub fn new(port: P, clock: C) -> Self {
        Self { port, clock }
    }

    /// Service at most one pending command.
    ///
    /// # Errors
    /// Returns an error if the port or the clock itself fails. Invalid
    /// operator input is not an error.
    pub fn poll(&mut self) -> Result<()> {
        let Some(c) = self.port.read_char()? else {
            return Ok(());
        };
        match c {
            's' | 'S' => self.set_time(),
            't' | 'T' => self.show_time(),
            c if c.is_whitespace() => Ok(()),
            other => {
                warn!(command = %other, "unknown console command");
                self.port
                    .write_str("unknown command; s = set clock, t = show time\n")
            }
        }
    }

    fn show_time(&mut self) -> Result<()> {
        let now = self.clock.now();
        self.port
            .write_str(&format!("{}\n", now.format("%Y-%m-%d %H:%M:%S")))
    }

    /// Walk the operator through setting the clock, one field per line.
    ///
    /// The first unusable answer aborts the whole command with a message;
    /// the clock is only ever written with a fully validated date and time.
    fn set_time(&mut self) -> Result<()> {
        let year = match self.prompt_field("year", 1970, 9999)? {
            Some(v) => v,
            None => return Ok(()),
        };
        let month = match self.prompt_field("month", 1, 12)? {
            Some(v) => v,
            None => return Ok(()),
        };
        let day = match self.prompt_field("day", 1, 31)? {
            Some(v) => v,
            None => return Ok(()),
        };
        let hour = match self.prompt_field("hour", 0, 23)? {
            Some(v) => v,
            None => return Ok(()),
        };
        let minute = match self.prompt_field("minute", 0, 59)? {
            Some(v) => v,
            None => return Ok(()),
        };
        let second = match self.prompt_field("second", 0, 59)? {
            Some(v) => v,
            None => return Ok(()),
        };

        // Per-field ranges let February 30th through; the calendar check is
        // chrono's.
        let Some(target) = Local
            .with_ymd_and_hms(year as i32, month, day, hour, minute, second)
            .single()
        else {
            self.port
                .write_str(&format!("{}\n", Error::InvalidDateTime))?;
            return Ok(());
        };

        self.clock.set(target)?;
        info!(%target, "clock set from console");
        self.port
            .write_str(&format!("clock set to {}\n", target.format("%Y-%m-%d %H:%M:%S")))
    }

    /// Prompt for one numeric field; `Ok(None)` means the operator's answer
    /// was rejected and the message already written.
    fn prompt_field(
        &mut self,
        field: &'static str,
        min: u32,
        max: u32,
    ) -> Result<Option<u32>> {
        self.port.write_str(&format!("{field}: "))?;
        let line = self.port.read_line(FIELD_MAX_LEN)?;
        match parse_field(field, &line, min, max) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(%field, input = %line.trim(), "rejected console time field");
                self.port.write_str(&format!("{err}\n"))?;
                Ok(None)
            }
        }
    }
}

fn parse_field(
    field: &'static str,
    raw: &str,
    min: u32,
    max: u32,
) -> vigia_core::Result<u32> {
    let trimmed = raw.trim();
    let value: u32 = trimmed.parse().map_err(|_| Error::MalformedTimeField {
        field,
        value: trimmed.to_string(),
    })?;
    if !(min..=max).contains(&value) {
        return Err(Error::TimeFieldOutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::{MockPort, MockPortHandle};
    use chrono::Timelike;
    use rstest::rstest;
    use vigia_hardware::Clock;
    use vigia_hardware::mock::MockClock;

    fn console_at_hour(hour: u8) -> (Console<MockPort, MockClock>, MockPortHandle, MockClock) {
        let (port, handle) = MockPort::new();
        let clock = MockClock::at_hour(hour);
        let console = Console::new(port, clock.clone());
        (console, handle, clock)
    }

    #[test]
    fn test_idle_port_is_a_no_op() {
        let (mut console, handle, _clock) = console_at_hour(10);
        console.poll().unwrap();
        assert_eq!(handle.output(), "");
    }

    #[test]
    fn test_show_time_prints_the_clock() {
        let (mut console, handle, clock) = console_at_hour(14);
        handle.push_str("t");

        console.poll().unwrap();

        let expected = format!("{}\n", clock.now().format("%Y-%m-%d %H:%M:%S"));
        assert_eq!(handle.output(), expected);
    }

    #[test]
    fn test_set_time_walks_all_fields_and_sets_the_clock() {
        let (mut console, handle, clock) = console_at_hour(10);
        handle.push_str("s");
        for line in ["2026", "3", "14", "9", "30", "5"] {
            handle.push_line(line);
        }

        console.poll().unwrap();

        let now = clock.now();
        assert_eq!(
            now.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2026-03-14 09:30:05"
        );
        assert_eq!(now.hour(), 9);
        let output = handle.output();
        for prompt in ["year: ", "month: ", "day: ", "hour: ", "minute: ", "second: "] {
            assert!(output.contains(prompt), "missing prompt in {output:?}");
        }
        assert!(output.contains("clock set to 2026-03-14 09:30:05"));
    }

    #[test]
    fn test_set_time_is_visible_through_clock_clones() {
        let (mut console, handle, clock) = console_at_hour(10);
        let observer = clock.clone();
        handle.push_str("s");
        for line in ["2026", "1", "1", "23", "0", "0"] {
            handle.push_line(line);
        }

        console.poll().unwrap();
        assert_eq!(observer.now().hour(), 23);
    }

    #[rstest]
    #[case("abc", "month")]
    #[case("", "month")]
    #[case("13", "month")]
    #[case("0", "month")]
    fn test_bad_month_aborts_without_touching_the_clock(
        #[case] month: &str,
        #[case] field: &str,
    ) {
        let (mut console, handle, clock) = console_at_hour(10);
        let before = clock.now();
        handle.push_str("s");
        handle.push_line("2026");
        handle.push_line(month);

        console.poll().unwrap();

        assert_eq!(clock.now(), before);
        let output = handle.output();
        assert!(output.contains(field), "no field name in {output:?}");
        assert!(!output.contains("day: "), "dialogue kept going: {output:?}");
    }

    #[rstest]
    #[case("24", "hour")]
    #[case("60", "minute")]
    #[case("60", "second")]
    fn test_out_of_range_fields_are_rejected(#[case] bad: &str, #[case] field: &str) {
        let (mut console, handle, clock) = console_at_hour(10);
        let before = clock.now();
        handle.push_str("s");
        let good: &[&str] = match field {
            "hour" => &["2026", "1", "1"],
            "minute" => &["2026", "1", "1", "12"],
            _ => &["2026", "1", "1", "12", "30"],
        };
        for line in good {
            handle.push_line(line);
        }
        handle.push_line(bad);

        console.poll().unwrap();

        assert_eq!(clock.now(), before);
        assert!(handle.output().contains("out of range"));
    }

    #[test]
    fn test_impossible_calendar_date_is_rejected() {
        // Every field is in range, but the date does not exist.
        let (mut console, handle, clock) = console_at_hour(10);
        let before = clock.now();
        handle.push_str("s");
        for line in ["2026", "2", "30", "12", "0", "0"] {
            handle.push_line(line);
        }

        console.poll().unwrap();

        assert_eq!(clock.now(), before);
        assert!(handle.output().contains("Invalid calendar date"));
    }

    #[test]
    fn test_field_input_accepts_surrounding_whitespace() {
        let (mut console, handle, clock) = console_at_hour(10);
        handle.push_str("s");
        for line in [" 2026 ", " 6", "1 ", "8", "0", "0"] {
            handle.push_line(line);
        }

        console.poll().unwrap();
        assert_eq!(clock.now().hour(), 8);
    }

    #[test]
    fn test_unknown_command_prints_help() {
        let (mut console, handle, _clock) = console_at_hour(10);
        handle.push_str("x");
        console.poll().unwrap();
        assert!(handle.output().contains("unknown command"));
    }

    #[test]
    fn test_whitespace_input_is_ignored() {
        let (mut console, handle, _clock) = console_at_hour(10);
        handle.push_str(" \n\t");
        for _ in 0..3 {
            console.poll().unwrap();
        }
        assert_eq!(handle.output(), "");
    }

    #[test]
    fn test_uppercase_commands_work() {
        let (mut console, handle, _clock) = console_at_hour(10);
        handle.push_str("T");
        console.poll().unwrap();
        assert!(!handle.output().is_empty());
    }

    #[test]
    fn test_one_command_per_poll() {
        let (mut console, handle, _clock) = console_at_hour(10);
        handle.push_str("tt");

        console.poll().unwrap();
        let after_first = handle.output();
        assert_eq!(after_first.lines().count(), 1);

        console.poll().unwrap();
        assert_eq!(handle.output().lines().count(), 2);
    }

    #[test]
    fn test_parse_field_errors_name_the_value() {
        let err = parse_field("day", "32", 1, 31).unwrap_err();
        assert!(err.to_string().contains("32"));

        let err = parse_field("day", "x7", 1, 31).unwrap_err();
        assert!(err.to_string().contains("x7"));
    }
}
