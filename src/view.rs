//! Derived view model for rendering the labeler.
//!
//! Nothing here is stored; it is recomputed from the catalog, the selection
//! and the transient widget state on every render.

use serde::Serialize;

use crate::color_utils::to_hex;
use crate::keybindings::{Key, key_to_string};

/// One selectable label button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelButton {
    /// Label id
    pub id: String,
    /// Label description
    pub description: String,
    /// Background color
    pub color: [u8; 3],
    /// Shortcut character, hidden when hotkeys are disabled
    pub shortcut: Option<char>,
    /// Whether the label is part of the current selection
    pub checked: bool,
    /// Whether the label was just toggled
    pub enlarged: bool,
}

impl LabelButton {
    /// Button text, e.g. `"dog (d)"`.
    pub fn caption(&self) -> String {
        match self.shortcut {
            Some(c) => format!("{} ({})", self.id, key_to_string(Key::Char(c))),
            None => self.id.clone(),
        }
    }

    /// Background color as `#rrggbb`.
    pub fn color_hex(&self) -> String {
        to_hex(self.color)
    }
}

/// Everything needed to draw the current sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationView {
    /// Image of the current sample
    pub image_url: String,
    /// Current sample index
    pub sample_index: usize,
    /// Number of samples
    pub sample_count: usize,
    /// Progress string like "3/15"
    pub progress: String,
    /// Label buttons in catalog order
    pub buttons: Vec<LabelButton>,
}

impl ClassificationView {
    /// Ids of the checked buttons, in catalog order.
    pub fn checked_ids(&self) -> Vec<&str> {
        self.buttons
            .iter()
            .filter(|button| button.checked)
            .map(|button| button.id.as_str())
            .collect()
    }
}
