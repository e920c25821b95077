//! Demo binary: the full controller wired to mock peripherals.
//!
//! Runs the tick loop exactly as a deployment would, with a driver task
//! playing the operator: it types the access code on the mock keypad, works
//! the door handle, and asks the serial console for the time. Useful for
//! watching the whole pipeline behave without any hardware attached.

use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use tokio::time;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vigia_console::{Console, MockPort, MockPortHandle};
use vigia_core::constants::{
    BEGIN_ENTRY_KEY, DEFAULT_CODE, DEFAULT_END_HOUR, DEFAULT_START_HOUR, KEYPAD_COLS,
    KEYPAD_ROWS, TICK_INCREMENT_MS,
};
use vigia_core::{AccessCode, DoorState, HourWindow};
use vigia_door::DoorController;
use vigia_hardware::mock::{MockDoorSensor, MockDoorSensorHandle, MockKeypadBus, MockKeypadHandle, MockPanel};
use vigia_hardware::{Clock, SettableClock, SystemClock};
use vigia_keypad::{KeyLayout, KeypadDebouncer, MatrixScanner};

/// How long the driver holds each key, comfortably past the debounce
/// threshold at the real tick cadence.
const KEY_HOLD: Duration = Duration::from_millis(120);
const KEY_GAP: Duration = Duration::from_millis(60);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(version = vigia_core::VERSION, "vigia controller starting");

    let (bus, keypad) = MockKeypadBus::new(KEYPAD_ROWS, KEYPAD_COLS);
    let (sensor, door) = MockDoorSensor::new();
    let (panel, lamps) = MockPanel::new();
    let (port, serial) = MockPort::new();

    // Shift the shared clock into the permitted window so the demo works at
    // any hour of the host day.
    let mut clock = SystemClock::new();
    let today = clock.now().date_naive();
    if let Some(in_window) = today
        .and_hms_opt(u32::from(DEFAULT_START_HOUR) + 2, 0, 0)
        .and_then(|t| t.and_local_timezone(Local).single())
    {
        clock.set(in_window)?;
    }

    let mut controller = DoorController::new(
        KeypadDebouncer::new(MatrixScanner::new(bus)),
        sensor,
        panel,
        clock.clone(),
        AccessCode::new(DEFAULT_CODE.to_vec())?,
        HourWindow::new(DEFAULT_START_HOUR, DEFAULT_END_HOUR)?,
    )?;
    let mut console = Console::new(port, clock);

    let driver = tokio::spawn(run_operator(keypad, door, serial.clone()));

    let mut ticker = time::interval(Duration::from_millis(u64::from(TICK_INCREMENT_MS)));
    let mut last_state = controller.state();
    loop {
        ticker.tick().await;
        controller.update()?;
        console.poll()?;

        if controller.state() != last_state {
            info!(from = %last_state, to = %controller.state(), "door state changed");
            last_state = controller.state();
        }
        if driver.is_finished() && controller.state() == DoorState::Closed {
            break;
        }
    }
    driver.await?;

    for line in serial.output().lines() {
        info!(console = %line, "serial output");
    }
    info!(
        locked = lamps.is_on(vigia_hardware::Indicator::Locked),
        "demo complete, door relocked"
    );
    Ok(())
}

/// Scripted operator: asks for the time, types the code, opens and closes
/// the door.
async fn run_operator(
    keypad: MockKeypadHandle,
    door: MockDoorSensorHandle,
    serial: MockPortHandle,
) {
    let layout = KeyLayout::standard();
    time::sleep(Duration::from_millis(200)).await;

    serial.push_str("t");
    time::sleep(Duration::from_millis(100)).await;

    for key in std::iter::once(BEGIN_ENTRY_KEY).chain(DEFAULT_CODE) {
        let Some((row, col)) = layout.position_of(key) else {
            continue;
        };
        if keypad.press(row, col).is_err() {
            return;
        }
        time::sleep(KEY_HOLD).await;
        keypad.release();
        time::sleep(KEY_GAP).await;
    }

    time::sleep(Duration::from_millis(200)).await;
    door.set_open(true);
    time::sleep(Duration::from_millis(400)).await;
    door.set_open(false);
}
