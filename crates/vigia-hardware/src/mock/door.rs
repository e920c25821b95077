//! Mock door-handle sensor.

use crate::{Result, traits::DoorSensor};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Mock door-handle sensor for testing and development.
///
/// # Examples
///
/// ```
/// use vigia_hardware::mock::MockDoorSensor;
/// use vigia_hardware::traits::DoorSensor;
///
/// let (sensor, handle) = MockDoorSensor::new();
/// assert!(!sensor.is_open().unwrap());
///
/// handle.set_open(true);
/// assert!(sensor.is_open().unwrap());
/// ```
#[derive(Debug)]
pub struct MockDoorSensor {
    open: Arc<AtomicBool>,
}

impl MockDoorSensor {
    /// Create a sensor reading "closed", plus the handle that toggles it.
    #[must_use]
    pub fn new() -> (Self, MockDoorSensorHandle) {
        let open = Arc::new(AtomicBool::new(false));
        let sensor = Self {
            open: Arc::clone(&open),
        };
        (sensor, MockDoorSensorHandle { open })
    }
}

impl DoorSensor for MockDoorSensor {
    fn is_open(&self) -> Result<bool> {
        Ok(self.open.load(Ordering::SeqCst))
    }
}

/// Handle for toggling a [`MockDoorSensor`].
#[derive(Debug, Clone)]
pub struct MockDoorSensorHandle {
    open: Arc<AtomicBool>,
}

impl MockDoorSensorHandle {
    /// Simulate the door being opened or closed.
    pub fn set_open(&self, open: bool) {
        self.open.store(open, Ordering::SeqCst);
    }
}
