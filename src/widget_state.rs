//! Transient view state layered on top of the selection.
//!
//! Neither piece here is part of the annotation value: the enlarged marker is
//! visual feedback for the last toggled label, and the hotkey listener tracks
//! which keyboard subscription the host may dispatch through.

use web_time::Instant;

use crate::constants::ENLARGE_DURATION;

/// Marker for the label that was just toggled.
///
/// The marker clears itself [`ENLARGE_DURATION`] after it was set. The host
/// drives the clock through [`EnlargedLabelState::poll`].
#[derive(Debug, Clone, Default)]
pub struct EnlargedLabelState {
    label: Option<String>,
    clear_at: Option<Instant>,
}

impl EnlargedLabelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a label as enlarged.
    ///
    /// The clear timer is re-armed only when the marked label changes, so
    /// repeated toggles of one label still clear on the first deadline.
    pub fn enlarge(&mut self, id: &str, now: Instant) {
        if self.label.as_deref() == Some(id) && self.clear_at.is_some() {
            return;
        }
        self.label = Some(id.to_string());
        self.clear_at = Some(now + ENLARGE_DURATION);
    }

    /// Clear the marker if its deadline has passed. Returns true if it cleared.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.clear_at {
            Some(deadline) if now >= deadline => {
                self.cancel();
                true
            }
            _ => false,
        }
    }

    /// Drop the marker and its pending timer.
    pub fn cancel(&mut self) {
        self.label = None;
        self.clear_at = None;
    }

    /// Currently enlarged label id.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Whether the given label is enlarged.
    pub fn is_enlarged(&self, id: &str) -> bool {
        self.label() == Some(id)
    }

    /// When the pending clear fires, if a timer is armed.
    pub fn deadline(&self) -> Option<Instant> {
        self.clear_at
    }
}

/// Handle returned to the host when keyboard handling is enabled.
///
/// Key events must be dispatched with the handle they were registered
/// under; a handle from before the last release is stale and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeySubscription {
    generation: u64,
}

/// Keyboard listener lifetime.
#[derive(Debug, Clone, Default)]
pub struct HotkeyListenerState {
    generation: u64,
    active: bool,
}

impl HotkeyListenerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh listener, invalidating any earlier handle.
    pub fn acquire(&mut self) -> HotkeySubscription {
        self.generation += 1;
        self.active = true;
        log::debug!("⌨️ Hotkey listener acquired (generation {})", self.generation);
        HotkeySubscription {
            generation: self.generation,
        }
    }

    /// Release the listener. Outstanding handles become stale.
    pub fn release(&mut self) {
        if self.active {
            self.generation += 1;
            self.active = false;
            log::debug!("⌨️ Hotkey listener released");
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether key events under this handle should be dispatched.
    pub fn accepts(&self, subscription: HotkeySubscription) -> bool {
        self.active && subscription.generation == self.generation
    }

    /// The live handle, if a listener is registered.
    pub fn current(&self) -> Option<HotkeySubscription> {
        self.active.then_some(HotkeySubscription {
            generation: self.generation,
        })
    }
}

/// Combined transient state.
#[derive(Debug, Clone, Default)]
pub struct WidgetState {
    /// Enlarged label feedback
    pub enlarged: EnlargedLabelState,
    /// Keyboard listener registration
    pub hotkeys: HotkeyListenerState,
}

impl WidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the pending timer and release the keyboard listener.
    pub fn teardown(&mut self) {
        self.enlarged.cancel();
        self.hotkeys.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_enlarged_marker_clears_after_delay() {
        let start = Instant::now();
        let mut state = EnlargedLabelState::new();

        state.enlarge("cat", start);
        assert!(state.is_enlarged("cat"));
        assert_eq!(state.deadline(), Some(start + ENLARGE_DURATION));

        assert!(!state.poll(start + Duration::from_millis(50)));
        assert!(state.is_enlarged("cat"));

        assert!(state.poll(start + ENLARGE_DURATION));
        assert_eq!(state.label(), None);
        assert_eq!(state.deadline(), None);
    }

    #[test]
    fn test_enlarged_marker_rearms_on_change() {
        let start = Instant::now();
        let mut state = EnlargedLabelState::new();

        state.enlarge("cat", start);
        let later = start + Duration::from_millis(60);
        state.enlarge("dog", later);

        assert!(!state.poll(start + ENLARGE_DURATION));
        assert!(state.is_enlarged("dog"));
        assert!(state.poll(later + ENLARGE_DURATION));
    }

    #[test]
    fn test_enlarged_marker_same_label_keeps_deadline() {
        let start = Instant::now();
        let mut state = EnlargedLabelState::new();

        state.enlarge("cat", start);
        state.enlarge("cat", start + Duration::from_millis(60));
        assert_eq!(state.deadline(), Some(start + ENLARGE_DURATION));
    }

    #[test]
    fn test_hotkey_listener_lifecycle() {
        let mut state = HotkeyListenerState::new();
        assert!(!state.is_active());
        assert_eq!(state.current(), None);

        let first = state.acquire();
        assert!(state.accepts(first));
        assert_eq!(state.current(), Some(first));

        let second = state.acquire();
        assert!(!state.accepts(first), "re-acquiring invalidates old handles");
        assert!(state.accepts(second));

        state.release();
        assert!(!state.accepts(second));
        assert!(!state.is_active());
    }

    #[test]
    fn test_teardown_releases_everything() {
        let mut state = WidgetState::new();
        state.enlarged.enlarge("cat", Instant::now());
        let subscription = state.hotkeys.acquire();

        state.teardown();
        assert_eq!(state.enlarged.label(), None);
        assert!(!state.hotkeys.accepts(subscription));
    }
}
