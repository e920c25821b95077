//! Hardware abstraction layer for the vigia door-lock controller.
//!
//! This crate provides trait-based abstractions for the peripherals the
//! controller touches: the keypad row/column lines, the door-handle sensor,
//! the indicator lamps, and the wall clock. The traits enable substitution
//! between mock implementations (for development and testing) and real pin
//! drivers.
//!
//! # Design Philosophy
//!
//! Unlike I/O that waits on external events, everything here is sampled:
//! the controller polls pins once per tick and the debounce timer counts
//! ticks, not wall time. The traits are therefore synchronous and
//! non-blocking; the caller owns the cadence.
//!
//! - **Injected, not ambient**: every peripheral is an explicit dependency
//!   passed to the component that uses it; there are no global pin tables.
//! - **Error-aware**: all operations return [`Result<T>`][error::Result]
//!   so a disconnected or miswired peripheral surfaces as an error instead
//!   of a silent misread.
//!
//! # Mock Implementations
//!
//! The [`mock`] module provides simulated peripherals driven through handle
//! types, so the whole controller can run and be tested without physical
//! hardware:
//!
//! ```
//! use vigia_hardware::mock::MockDoorSensor;
//! use vigia_hardware::traits::DoorSensor;
//!
//! let (sensor, handle) = MockDoorSensor::new();
//! assert!(!sensor.is_open().unwrap());
//!
//! handle.set_open(true);
//! assert!(sensor.is_open().unwrap());
//! ```

pub mod clock;
pub mod error;
pub mod mock;
pub mod traits;

// Re-export commonly used types for convenience
pub use clock::SystemClock;
pub use error::{HardwareError, Result};
pub use traits::{Clock, DoorSensor, Indicator, IndicatorPanel, KeypadBus, SettableClock};
