//! The door controller state machine.

use chrono::Timelike;
use tracing::{debug, info, warn};
use vigia_core::constants::{BEGIN_ENTRY_KEY, INCORRECT_CODE_FLASH_MS, TICK_INCREMENT_MS};
use vigia_core::{AccessCode, DoorState, HourWindow, Key};
use vigia_hardware::{Clock, DoorSensor, Indicator, IndicatorPanel, Result};
use vigia_keypad::{KeySource, KeypadDebouncer};

/// Drives the door lock from debounced key events and the handle sensor.
///
/// The controller owns the [`DoorState`] and is the only writer of the
/// indicator lamps. It is ticked by the caller through [`update`]; every
/// peripheral is an injected dependency, and the wall clock is consulted
/// only at the moment a code-entry sequence begins.
///
/// # Blocking
///
/// [`update`] is non-blocking on every path except one: when the
/// begin-entry key is released inside the permitted hour window, the call
/// runs the code-capture protocol to completion before returning. See
/// [`update`] for the contract.
///
/// [`update`]: DoorController::update
#[derive(Debug)]
pub struct DoorController<S, D, P, C>
where
    S: KeySource,
    D: DoorSensor,
    P: IndicatorPanel,
    C: Clock,
{
    state: DoorState,
    keypad: KeypadDebouncer<S>,
    sensor: D,
    panel: P,
    clock: C,
    code: AccessCode,
    window: HourWindow,
    begin_key: Key,

    /// Ticks left on the incorrect-code lamp, zero when dark.
    flash_ticks: u32,
}

impl<S, D, P, C> DoorController<S, D, P, C>
where
    S: KeySource,
    D: DoorSensor,
    P: IndicatorPanel,
    C: Clock,
{
    /// Create a controller in the `Closed` state with the lamps
    /// initialized (locked lit, unlocked and incorrect-code dark).
    ///
    /// # Errors
    /// Returns an error if the indicator lamps cannot be driven.
    pub fn new(
        keypad: KeypadDebouncer<S>,
        sensor: D,
        panel: P,
        clock: C,
        code: AccessCode,
        window: HourWindow,
    ) -> Result<Self> {
        let mut controller = Self {
            state: DoorState::Closed,
            keypad,
            sensor,
            panel,
            clock,
            code,
            window,
            begin_key: BEGIN_ENTRY_KEY,
            flash_ticks: 0,
        };
        controller.init_indicators()?;
        Ok(controller)
    }

    /// Current door state.
    #[must_use]
    pub fn state(&self) -> DoorState {
        self.state
    }

    /// The wrapped keypad debouncer.
    #[must_use]
    pub fn keypad(&self) -> &KeypadDebouncer<S> {
        &self.keypad
    }

    /// Reset to `Closed` with full re-initialization of the indicators and
    /// the keypad machine. Defensive recovery; never part of the normal
    /// cycle.
    ///
    /// # Errors
    /// Returns an error if the indicator lamps cannot be driven.
    pub fn reset(&mut self) -> Result<()> {
        self.state = DoorState::Closed;
        self.flash_ticks = 0;
        self.keypad.reset();
        self.init_indicators()
    }

    /// Advance the controller by one tick.
    ///
    /// In `Closed`, ticks the keypad debouncer and reacts to a begin-entry
    /// key release; in `Unlocked` and `Open`, follows the handle sensor.
    /// With no key events and an unchanged sensor this is a no-op: state
    /// and lamps are left exactly as they were.
    ///
    /// When a code capture starts, this call does not return until the
    /// capture completes; the serial console and everything else on the
    /// cooperative loop is starved for the duration. Code entry is a
    /// brief, operator-driven event; there is no timeout or cancel key,
    /// so an operator who starts an entry must finish it.
    ///
    /// # Errors
    /// Propagates peripheral failures; the door state is unchanged if the
    /// tick fails.
    pub fn update(&mut self) -> Result<()> {
        match self.state {
            DoorState::Closed => self.update_closed(),
            DoorState::Unlocked => {
                if self.sensor.is_open()? {
                    self.panel.set_indicator(Indicator::Unlocked, false)?;
                    self.transition(DoorState::Open);
                }
                Ok(())
            }
            DoorState::Open => {
                if !self.sensor.is_open()? {
                    self.panel.set_indicator(Indicator::Locked, true)?;
                    self.transition(DoorState::Closed);
                }
                Ok(())
            }
        }
    }

    fn update_closed(&mut self) -> Result<()> {
        // An active incorrect-code flash consumes the tick; the keypad is
        // not serviced until the lamp goes dark again.
        if self.flash_ticks > 0 {
            self.flash_ticks -= 1;
            if self.flash_ticks == 0 {
                self.panel.set_indicator(Indicator::IncorrectCode, false)?;
            }
            return Ok(());
        }

        let Some(released) = self.keypad.update()? else {
            return Ok(());
        };
        if released != self.begin_key {
            return Ok(());
        }

        let hour = self.clock.now().hour() as u8;
        if !self.window.contains(hour) {
            // Deliberately no feedback: the panel does not disclose
            // whether the hour gate or the code would have failed.
            debug!(hour, window = %self.window, "entry attempt outside permitted hours");
            return Ok(());
        }

        if self.capture_code()? {
            self.panel.set_indicator(Indicator::Locked, false)?;
            self.panel.set_indicator(Indicator::Unlocked, true)?;
            self.transition(DoorState::Unlocked);
            info!("access granted, door unlocked");
        } else {
            warn!("incorrect code entered");
            self.panel.set_indicator(Indicator::IncorrectCode, true)?;
            self.flash_ticks = INCORRECT_CODE_FLASH_MS / TICK_INCREMENT_MS;
        }
        Ok(())
    }

    /// Run the code-capture protocol to completion.
    ///
    /// Polls the debouncer synchronously until one release event per code
    /// position has been accepted. An accepted event must be a key release
    /// (never the absence of one) and must differ from the immediately
    /// preceding accepted symbol: a second consecutive identical release
    /// is an artifact of the same keystroke, not a new digit, and is
    /// re-polled. The begin-entry key seeds the predecessor for the first
    /// position.
    ///
    /// Every position is consumed even after a mismatch, so an entry is
    /// always exactly as many keystrokes as the code is long, and the
    /// comparison happens once, in constant time, over the full sequence.
    fn capture_code(&mut self) -> Result<bool> {
        let mut entered = Vec::with_capacity(self.code.len());
        let mut previous = self.begin_key;

        for _ in 0..self.code.len() {
            let accepted = loop {
                if let Some(released) = self.keypad.update()?
                    && released != previous
                {
                    break released;
                }
            };
            previous = accepted;
            entered.push(accepted);
        }

        Ok(self.code.matches(&entered))
    }

    fn init_indicators(&mut self) -> Result<()> {
        self.panel.set_indicator(Indicator::Unlocked, false)?;
        self.panel.set_indicator(Indicator::Locked, true)?;
        self.panel.set_indicator(Indicator::IncorrectCode, false)?;
        Ok(())
    }

    fn transition(&mut self, to: DoorState) {
        debug_assert!(self.state.can_transition_to(to));
        debug!(from = %self.state, to = %to, "door state transition");
        self.state = to;
    }
}
