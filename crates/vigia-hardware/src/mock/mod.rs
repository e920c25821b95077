//! Mock peripheral implementations for testing and development.
//!
//! Each mock comes as a (device, handle) pair: the device half implements
//! the hardware trait and is handed to the controller, while the handle half
//! stays with the test or demo driver to simulate physical events and
//! inspect outputs.

pub mod clock;
pub mod door;
pub mod keypad;
pub mod panel;

// Re-export commonly used types
pub use clock::MockClock;
pub use door::{MockDoorSensor, MockDoorSensorHandle};
pub use keypad::{MockKeypadBus, MockKeypadHandle};
pub use panel::{MockPanel, MockPanelHandle};
