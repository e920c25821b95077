use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Keypad errors
    #[error("Invalid key character: {0:?}")]
    InvalidKey(char),

    #[error("Invalid digit: must be 0-9, got {0}")]
    InvalidDigit(u8),

    // Configuration errors
    #[error("Access code must have at least one key")]
    EmptyAccessCode,

    #[error("Invalid hour: must be 0-23, got {0}")]
    InvalidHour(u8),

    #[error("Invalid hour window: start {start} is after end {end}")]
    InvalidHourWindow { start: u8, end: u8 },

    // State machine errors
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },

    // Console errors
    #[error("Malformed {field} field: {value:?}")]
    MalformedTimeField { field: &'static str, value: String },

    #[error("{field} out of range: must be {min}-{max}, got {value}")]
    TimeFieldOutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("Invalid calendar date or time")]
    InvalidDateTime,

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
