//! Message types for the classification labeler.
//!
//! Every user action is represented as a message in the Elm architecture
//! style and applied with [`ImageClassification::update`](crate::ImageClassification::update).

use crate::keybindings::Key;
use crate::model::Annotation;
use crate::widget_state::HotkeySubscription;

/// Messages that can be sent to update labeler state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Label buttons
    /// Label button clicked, by label id
    ClickLabel(String),

    // Keyboard
    /// Key pressed while the given listener was registered
    Key {
        subscription: HotkeySubscription,
        key: Key,
    },

    // Navigation
    /// Commit the current selection, or the given output, and advance
    Next(Option<Annotation>),
    /// Go back one sample without saving
    Prev,
    /// Leave the session without saving
    Done,

    // Workspace header
    /// Header "next" button: leave towards the next sample without saving
    NextNoSave,
    /// Header "remove sample" button
    RemoveSample,
}
