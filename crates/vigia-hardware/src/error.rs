//! Error types for hardware operations.

/// Result type alias for hardware operations.
pub type Result<T> = std::result::Result<T, HardwareError>;

/// Errors that can occur during hardware peripheral operations.
#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    /// Device is not connected or has been disconnected.
    #[error("Device disconnected: {device}")]
    Disconnected { device: String },

    /// A row or column index outside the wired matrix.
    #[error("{line} line out of range: got {index}, matrix has {count}")]
    LineOutOfRange {
        line: &'static str,
        index: usize,
        count: usize,
    },

    /// Operation is not supported by this device.
    #[error("Unsupported operation: {operation}")]
    Unsupported { operation: String },

    /// Invalid data received from a device.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with custom message.
    #[error("{0}")]
    Other(String),
}

impl HardwareError {
    /// Create a new disconnected error.
    pub fn disconnected(device: impl Into<String>) -> Self {
        Self::Disconnected {
            device: device.into(),
        }
    }

    /// Create a new row-line out-of-range error.
    pub fn row_out_of_range(index: usize, count: usize) -> Self {
        Self::LineOutOfRange {
            line: "row",
            index,
            count,
        }
    }

    /// Create a new column-line out-of-range error.
    pub fn column_out_of_range(index: usize, count: usize) -> Self {
        Self::LineOutOfRange {
            line: "column",
            index,
            count,
        }
    }

    /// Create a new unsupported operation error.
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported {
            operation: operation.into(),
        }
    }

    /// Create a new invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Create a generic error with custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnected_error() {
        let error = HardwareError::disconnected("keypad bus");
        assert!(matches!(error, HardwareError::Disconnected { .. }));
        assert_eq!(error.to_string(), "Device disconnected: keypad bus");
    }

    #[test]
    fn test_line_out_of_range_error() {
        let error = HardwareError::row_out_of_range(5, 4);
        assert_eq!(
            error.to_string(),
            "row line out of range: got 5, matrix has 4"
        );

        let error = HardwareError::column_out_of_range(9, 4);
        assert_eq!(
            error.to_string(),
            "column line out of range: got 9, matrix has 4"
        );
    }

    #[test]
    fn test_unsupported_error() {
        let error = HardwareError::unsupported("set_backlight");
        assert_eq!(error.to_string(), "Unsupported operation: set_backlight");
    }
}
