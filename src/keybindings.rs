//! Keyboard shortcuts for navigation and label selection.
//!
//! Navigation keys are fixed. Each label additionally gets at most one
//! single-character shortcut, derived from its id by [`assign_shortcuts`].

use std::collections::{HashMap, HashSet};

use crate::color_utils::alphabet_position;
use crate::model::Label;

/// Keyboard keys the labeler understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Space,
    Backspace,
    Enter,
    Left,
    Right,
}

impl Key {
    /// Lowercase character keys and fold a literal space into [`Key::Space`].
    pub fn normalized(self) -> Self {
        match self {
            Key::Char(' ') => Key::Space,
            Key::Char(c) => Key::Char(c.to_lowercase().next().unwrap_or(c)),
            other => other,
        }
    }

    /// Parse a key name such as `"space"`, `"ArrowLeft"`, `"Enter"` or `"d"`.
    ///
    /// Names are matched case-insensitively; single characters map to
    /// [`Key::Char`].
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(Key::Char(c).normalized());
        }
        match name.to_lowercase().as_str() {
            "space" => Some(Key::Space),
            "backspace" => Some(Key::Backspace),
            "enter" | "return" => Some(Key::Enter),
            "left" | "arrowleft" | "leftarrow" => Some(Key::Left),
            "right" | "arrowright" | "rightarrow" => Some(Key::Right),
            _ => None,
        }
    }
}

/// What a key press does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    /// Commit the current selection and advance
    Next,
    /// Go back one sample without saving
    Previous,
    /// Leave the session without saving
    Done,
    /// Toggle the label at this catalog position
    ToggleLabel(usize),
}

/// Fixed navigation bindings, in lookup order.
pub const NAVIGATION_KEYS: [(Key, HotkeyAction); 5] = [
    (Key::Space, HotkeyAction::Next),
    (Key::Backspace, HotkeyAction::Previous),
    (Key::Enter, HotkeyAction::Done),
    (Key::Right, HotkeyAction::Next),
    (Key::Left, HotkeyAction::Previous),
];

/// Keys that block label shortcut assignment.
///
/// Arrow keys are bound too but cannot collide with a single character.
pub const RESERVED_KEYS: [Key; 3] = [Key::Space, Key::Backspace, Key::Enter];

/// Derive one optional shortcut character per label, in label order.
///
/// Each label takes the first character of its id that is in the label
/// alphabet and not yet claimed by a reserved key or an earlier label.
/// Uppercase characters are not in the alphabet and are skipped.
pub fn assign_shortcuts(labels: &[Label], reserved: &[Key]) -> Vec<Option<char>> {
    let mut claimed: HashSet<char> = reserved
        .iter()
        .filter_map(|key| match key.normalized() {
            Key::Char(c) => Some(c),
            _ => None,
        })
        .collect();

    labels
        .iter()
        .map(|label| {
            let shortcut = label
                .id
                .chars()
                .filter(|c| alphabet_position(*c).is_some())
                .find(|c| !claimed.contains(c));
            if let Some(c) = shortcut {
                claimed.insert(c);
            }
            shortcut
        })
        .collect()
}

/// Lookup table from key presses to actions for one label catalog.
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    bindings: HashMap<Key, HotkeyAction>,
}

impl KeyBindings {
    /// Build bindings from the navigation keys and per-label shortcuts.
    pub fn new(label_shortcuts: &[Option<char>]) -> Self {
        let mut bindings: HashMap<Key, HotkeyAction> = NAVIGATION_KEYS.into_iter().collect();
        for (index, shortcut) in label_shortcuts.iter().enumerate() {
            if let Some(c) = shortcut {
                bindings.insert(Key::Char(*c), HotkeyAction::ToggleLabel(index));
            }
        }
        Self { bindings }
    }

    /// Get the action bound to a key press, if any.
    pub fn action_for_key(&self, key: Key) -> Option<HotkeyAction> {
        self.bindings.get(&key.normalized()).copied()
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True when nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Convert a key to a display string.
pub fn key_to_string(key: Key) -> String {
    match key {
        Key::Char(c) => c.to_string(),
        Key::Space => "Space".to_string(),
        Key::Backspace => "Backspace".to_string(),
        Key::Enter => "Enter".to_string(),
        Key::Left => "←".to_string(),
        Key::Right => "→".to_string(),
    }
}
