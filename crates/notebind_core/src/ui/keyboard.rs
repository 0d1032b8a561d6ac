//! On-screen keyboard visibility tracking.

use crate::state::Store;

/// Platform keyboard notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardEvent {
    WillShow,
    WillHide,
}

/// Boolean store flipped by keyboard show/hide notifications.
#[derive(Clone)]
pub struct KeyboardVisibility {
    visible: Store<bool>,
}

impl KeyboardVisibility {
    pub fn new() -> Self {
        Self {
            visible: Store::new(false),
        }
    }

    /// Applies one platform notification.
    pub fn handle(&self, event: KeyboardEvent) {
        let visible = event == KeyboardEvent::WillShow;
        if self.visible.get() != visible {
            self.visible.set(visible);
        }
    }

    pub fn will_show(&self) {
        self.handle(KeyboardEvent::WillShow);
    }

    pub fn will_hide(&self) {
        self.handle(KeyboardEvent::WillHide);
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Backing store, for layout code that re-flows on change.
    pub fn store(&self) -> &Store<bool> {
        &self.visible
    }
}

impl Default for KeyboardVisibility {
    fn default() -> Self {
        Self::new()
    }
}
