//! Selection state machine for the active sample.
//!
//! The selection is the in-progress annotation for the displayed sample. In
//! single-select mode it is empty or one label; in multi-select mode it is a
//! deduplicated list in the order labels were chosen.

use crate::model::Annotation;

/// Whether one or several labels may be chosen per sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Single,
    Multiple,
}

impl SelectionMode {
    /// Mode for an `allowMultiple` flag.
    pub fn from_allow_multiple(allow_multiple: bool) -> Self {
        if allow_multiple {
            SelectionMode::Multiple
        } else {
            SelectionMode::Single
        }
    }

    pub fn allows_multiple(self) -> bool {
        self == SelectionMode::Multiple
    }
}

/// Current selection for the displayed sample.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing chosen
    #[default]
    Empty,
    /// Single-select mode with one label chosen
    SingleChosen(String),
    /// Multi-select mode with at least one label chosen, in selection order
    PartialMulti(Vec<String>),
}

/// Result of toggling a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The label was selected and is now deselected
    Removed,
    /// The label was appended to a multi-select selection
    Added,
    /// The label replaced a single-select selection; commit now
    Chosen,
}

impl ToggleOutcome {
    /// Whether the toggle must be followed by an immediate commit.
    pub fn commits(self) -> bool {
        self == ToggleOutcome::Chosen
    }
}

impl Selection {
    /// Derive the selection from a sample's stored annotation.
    ///
    /// In single-select mode a stored list is coerced to its first id; the
    /// remaining ids are dropped from the in-progress selection.
    pub fn from_annotation(annotation: Option<&Annotation>, mode: SelectionMode) -> Self {
        let ids: Vec<String> = match annotation {
            None => return Selection::Empty,
            Some(annotation) => {
                let mut ids: Vec<String> = Vec::with_capacity(annotation.ids().len());
                for id in annotation.ids() {
                    if !ids.contains(id) {
                        ids.push(id.clone());
                    }
                }
                ids
            }
        };

        Self::from_ids(ids, mode)
    }

    fn from_ids(mut ids: Vec<String>, mode: SelectionMode) -> Self {
        if ids.is_empty() {
            return Selection::Empty;
        }
        match mode {
            SelectionMode::Multiple => Selection::PartialMulti(ids),
            SelectionMode::Single => {
                if ids.len() > 1 {
                    log::warn!(
                        "Single-select sample has {} stored labels; keeping '{}'",
                        ids.len(),
                        ids[0]
                    );
                }
                Selection::SingleChosen(ids.swap_remove(0))
            }
        }
    }

    /// Selected label ids, in order.
    pub fn ids(&self) -> &[String] {
        match self {
            Selection::Empty => &[],
            Selection::SingleChosen(id) => std::slice::from_ref(id),
            Selection::PartialMulti(ids) => ids,
        }
    }

    /// Whether the label id is selected.
    pub fn contains(&self, id: &str) -> bool {
        self.ids().iter().any(|selected| selected == id)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }

    /// Toggle a label.
    ///
    /// A selected label is removed. Otherwise it is appended in multi-select
    /// mode, or replaces the selection in single-select mode, which asks the
    /// caller to commit right away.
    pub fn toggle(&mut self, id: &str, mode: SelectionMode) -> ToggleOutcome {
        if self.contains(id) {
            let remaining: Vec<String> = self
                .ids()
                .iter()
                .filter(|selected| *selected != id)
                .cloned()
                .collect();
            let keeps_multi = matches!(self, Selection::PartialMulti(_)) && !remaining.is_empty();
            *self = if keeps_multi {
                Selection::PartialMulti(remaining)
            } else {
                Selection::Empty
            };
            return ToggleOutcome::Removed;
        }

        match mode {
            SelectionMode::Multiple => {
                let mut ids = self.ids().to_vec();
                ids.push(id.to_string());
                *self = Selection::PartialMulti(ids);
                ToggleOutcome::Added
            }
            SelectionMode::Single => {
                *self = Selection::SingleChosen(id.to_string());
                ToggleOutcome::Chosen
            }
        }
    }

    /// Re-shape the selection after the mode changed.
    pub fn coerce(&mut self, mode: SelectionMode) {
        let ids = self.ids().to_vec();
        *self = Self::from_ids(ids, mode);
    }

    /// The annotation value a commit would store.
    ///
    /// Multi-select mode always yields a list, possibly empty. Single-select
    /// mode yields the chosen id, or `None` when nothing is chosen.
    pub fn to_annotation(&self, mode: SelectionMode) -> Option<Annotation> {
        match (mode, self) {
            (SelectionMode::Multiple, selection) => {
                Some(Annotation::Multiple(selection.ids().to_vec()))
            }
            (SelectionMode::Single, Selection::Empty) => None,
            (SelectionMode::Single, selection) => {
                selection.ids().first().cloned().map(Annotation::Single)
            }
        }
    }
}
