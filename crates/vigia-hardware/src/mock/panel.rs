//! Mock indicator panel that records lamp switching.

use crate::{
    Result,
    traits::{Indicator, IndicatorPanel},
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct PanelShared {
    states: HashMap<Indicator, bool>,
    history: Vec<(Indicator, bool)>,
}

/// Mock indicator panel for testing and development.
///
/// Every `set_indicator` call is recorded: the handle exposes both the
/// current lamp states and the full switching history, so tests can assert
/// not only where the lamps ended up but the order they got there.
///
/// # Examples
///
/// ```
/// use vigia_hardware::mock::MockPanel;
/// use vigia_hardware::traits::{Indicator, IndicatorPanel};
///
/// let (mut panel, view) = MockPanel::new();
/// panel.set_indicator(Indicator::Locked, true).unwrap();
///
/// assert!(view.is_on(Indicator::Locked));
/// assert!(!view.is_on(Indicator::Unlocked));
/// ```
#[derive(Debug)]
pub struct MockPanel {
    shared: Arc<Mutex<PanelShared>>,
}

impl MockPanel {
    /// Create a panel with all lamps off, plus its inspection handle.
    #[must_use]
    pub fn new() -> (Self, MockPanelHandle) {
        let shared = Arc::new(Mutex::new(PanelShared::default()));
        let panel = Self {
            shared: Arc::clone(&shared),
        };
        (panel, MockPanelHandle { shared })
    }
}

impl IndicatorPanel for MockPanel {
    fn set_indicator(&mut self, indicator: Indicator, on: bool) -> Result<()> {
        let mut shared = self
            .shared
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        shared.states.insert(indicator, on);
        shared.history.push((indicator, on));
        Ok(())
    }
}

/// Inspection handle for a [`MockPanel`].
#[derive(Debug, Clone)]
pub struct MockPanelHandle {
    shared: Arc<Mutex<PanelShared>>,
}

impl MockPanelHandle {
    /// Current state of a lamp; lamps never touched read as off.
    #[must_use]
    pub fn is_on(&self, indicator: Indicator) -> bool {
        self.shared().states.get(&indicator).copied().unwrap_or(false)
    }

    /// Every switching event in order, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<(Indicator, bool)> {
        self.shared().history.clone()
    }

    /// Forget the recorded history (current lamp states are kept).
    pub fn clear_history(&self) {
        self.shared().history.clear();
    }

    fn shared(&self) -> MutexGuard<'_, PanelShared> {
        self.shared
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untouched_lamps_read_off() {
        let (_panel, view) = MockPanel::new();
        assert!(!view.is_on(Indicator::Unlocked));
        assert!(!view.is_on(Indicator::Locked));
        assert!(!view.is_on(Indicator::IncorrectCode));
    }

    #[test]
    fn test_states_track_latest_write() {
        let (mut panel, view) = MockPanel::new();
        panel.set_indicator(Indicator::Locked, true).unwrap();
        panel.set_indicator(Indicator::Locked, false).unwrap();
        assert!(!view.is_on(Indicator::Locked));
    }

    #[test]
    fn test_history_preserves_order() {
        let (mut panel, view) = MockPanel::new();
        panel.set_indicator(Indicator::Locked, true).unwrap();
        panel.set_indicator(Indicator::Unlocked, true).unwrap();
        panel.set_indicator(Indicator::Locked, false).unwrap();

        assert_eq!(
            view.history(),
            vec![
                (Indicator::Locked, true),
                (Indicator::Unlocked, true),
                (Indicator::Locked, false),
            ]
        );
    }

    #[test]
    fn test_clear_history_keeps_states() {
        let (mut panel, view) = MockPanel::new();
        panel.set_indicator(Indicator::Unlocked, true).unwrap();
        view.clear_history();

        assert!(view.history().is_empty());
        assert!(view.is_on(Indicator::Unlocked));
    }
}
