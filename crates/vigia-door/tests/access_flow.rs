//! End-to-end access flows over the real scan and debounce pipeline.
//!
//! These tests wire the controller to a [`MatrixScanner`] over a mock pin
//! matrix, with a driver thread pressing and releasing keys while the main
//! thread ticks the controller, the way the deployed loop runs it.

use std::thread;
use std::time::{Duration, Instant};

use vigia_core::constants::{KEYPAD_COLS, KEYPAD_ROWS};
use vigia_core::{AccessCode, DoorState, HourWindow, Key};
use vigia_door::DoorController;
use vigia_hardware::mock::{MockClock, MockDoorSensor, MockKeypadBus, MockKeypadHandle, MockPanel};
use vigia_hardware::{DoorSensor, Indicator, IndicatorPanel};
use vigia_keypad::{KeyLayout, KeypadDebouncer, MatrixScanner, ScriptedKeys};

const TEST_DEADLINE: Duration = Duration::from_secs(5);
const HOLD: Duration = Duration::from_millis(60);
const GAP: Duration = Duration::from_millis(30);

fn new_controller<S, D, P>(
    source: S,
    sensor: D,
    panel: P,
    hour: u8,
) -> DoorController<S, D, P, MockClock>
where
    S: vigia_keypad::KeySource,
    D: DoorSensor,
    P: IndicatorPanel,
{
    DoorController::new(
        KeypadDebouncer::new(source),
        sensor,
        panel,
        MockClock::at_hour(hour),
        AccessCode::parse("147").unwrap(),
        HourWindow::new(8, 16).unwrap(),
    )
    .unwrap()
}

/// Press each key on the mock matrix long enough to survive debouncing.
fn type_keys(handle: &MockKeypadHandle, keys: &[Key]) {
    let layout = KeyLayout::standard();
    for key in keys {
        let (row, col) = layout.position_of(*key).unwrap();
        handle.press(row, col).unwrap();
        thread::sleep(HOLD);
        handle.release();
        thread::sleep(GAP);
    }
}

/// Tick the controller until `done` holds or the deadline passes.
fn tick_until<S, D, P>(
    controller: &mut DoorController<S, D, P, MockClock>,
    done: impl Fn(&DoorController<S, D, P, MockClock>) -> bool,
) -> bool
where
    S: vigia_keypad::KeySource,
    D: DoorSensor,
    P: IndicatorPanel,
{
    let deadline = Instant::now() + TEST_DEADLINE;
    while Instant::now() < deadline {
        controller.update().unwrap();
        if done(controller) {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    false
}

#[test]
fn correct_code_unlocks_over_mock_matrix() {
    let (bus, keypad) = MockKeypadBus::new(KEYPAD_ROWS, KEYPAD_COLS);
    let (sensor, _door) = MockDoorSensor::new();
    let (panel, lamps) = MockPanel::new();
    let mut controller = new_controller(MatrixScanner::new(bus), sensor, panel, 10);

    let typist = thread::spawn(move || {
        type_keys(
            &keypad,
            &[Key::A, Key::Digit(1), Key::Digit(4), Key::Digit(7)],
        );
    });

    let unlocked = tick_until(&mut controller, |c| c.state() == DoorState::Unlocked);
    typist.join().unwrap();

    assert!(unlocked, "door never unlocked");
    assert!(lamps.is_on(Indicator::Unlocked));
    assert!(!lamps.is_on(Indicator::Locked));
}

#[test]
fn wrong_code_flashes_and_stays_closed() {
    let (bus, keypad) = MockKeypadBus::new(KEYPAD_ROWS, KEYPAD_COLS);
    let (sensor, _door) = MockDoorSensor::new();
    let (panel, lamps) = MockPanel::new();
    let mut controller = new_controller(MatrixScanner::new(bus), sensor, panel, 10);

    let typist = thread::spawn(move || {
        type_keys(
            &keypad,
            &[Key::A, Key::Digit(1), Key::Digit(4), Key::Digit(8)],
        );
    });

    let flashed = tick_until(&mut controller, |_| lamps.is_on(Indicator::IncorrectCode));
    typist.join().unwrap();

    assert!(flashed, "incorrect-code lamp never lit");
    assert_eq!(controller.state(), DoorState::Closed);

    // The flash times out on its own and the door can be retried.
    let dark = tick_until(&mut controller, |_| !lamps.is_on(Indicator::IncorrectCode));
    assert!(dark, "incorrect-code lamp never went dark");
    assert_eq!(controller.state(), DoorState::Closed);
}

#[test]
fn full_cycle_unlock_open_close_relocks() {
    let (sensor, door) = MockDoorSensor::new();
    let (panel, lamps) = MockPanel::new();

    let mut script = ScriptedKeys::new([]);
    for key in [Key::A, Key::Digit(1), Key::Digit(4), Key::Digit(7)] {
        script.tap(key);
    }
    let mut controller = new_controller(script, sensor, panel, 10);

    assert!(tick_until(&mut controller, |c| {
        c.state() == DoorState::Unlocked
    }));

    door.set_open(true);
    assert!(tick_until(&mut controller, |c| c.state() == DoorState::Open));
    assert!(!lamps.is_on(Indicator::Unlocked));

    door.set_open(false);
    assert!(tick_until(&mut controller, |c| {
        c.state() == DoorState::Closed
    }));
    assert!(lamps.is_on(Indicator::Locked));
}

#[test]
fn out_of_hours_attempt_leaves_no_trace() {
    let (bus, keypad) = MockKeypadBus::new(KEYPAD_ROWS, KEYPAD_COLS);
    let (sensor, _door) = MockDoorSensor::new();
    let (panel, lamps) = MockPanel::new();
    let mut controller = new_controller(MatrixScanner::new(bus), sensor, panel, 6);
    lamps.clear_history();

    let typist = thread::spawn(move || {
        type_keys(
            &keypad,
            &[Key::A, Key::Digit(1), Key::Digit(4), Key::Digit(7)],
        );
    });

    // Keep ticking through the whole typed sequence and a little past it.
    while !typist.is_finished() {
        controller.update().unwrap();
        thread::sleep(Duration::from_millis(1));
    }
    typist.join().unwrap();
    for _ in 0..50 {
        controller.update().unwrap();
    }

    assert_eq!(controller.state(), DoorState::Closed);
    assert!(lamps.history().is_empty());
}
