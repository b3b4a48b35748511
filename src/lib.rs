//! Image classification labeler
//!
//! Shows one image at a time next to a set of labels, lets the user pick
//! labels by click or keyboard shortcut, and hands each classification back
//! to the host workspace before moving on to the next sample.
//!
//! The crate is headless: hosts draw [`ClassificationView`] however they like
//! and forward clicks, key presses and clock ticks to [`ImageClassification`].

pub mod callback;
pub mod catalog;
pub mod classifier;
pub mod clobbered;
pub mod color_utils;
pub mod config;
pub mod constants;
pub mod error;
pub mod keybindings;
pub mod message;
pub mod model;
pub mod navigation;
pub mod selection;
pub mod view;
pub mod widget_state;

#[cfg(test)]
mod tests;

pub use catalog::LabelCatalog;
pub use classifier::{ImageClassification, ImageClassificationBuilder};
pub use config::{ContainerConfig, InterfaceConfig, SessionConfig};
pub use error::{ClassifyError, Result};
pub use keybindings::Key;
pub use message::Message;
pub use model::{Annotation, Label, LabelEntry, Sample};
pub use navigation::{ExitReason, NavigationOutcome};
pub use selection::{Selection, SelectionMode, ToggleOutcome};
pub use view::{ClassificationView, LabelButton};
pub use widget_state::HotkeySubscription;
