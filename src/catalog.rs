//! Label catalog: normalized labels with their colors and shortcuts.

use std::collections::HashSet;
use std::sync::Arc;

use crate::color_utils::label_color;
use crate::error::{ClassifyError, Result};
use crate::keybindings::{KeyBindings, RESERVED_KEYS, assign_shortcuts};
use crate::model::{Label, LabelEntry};

/// The normalized label set for one configured label list.
///
/// Colors and shortcuts are stored by label position, so render order,
/// shortcut scan order and lookup all follow configuration order.
#[derive(Debug, Clone)]
pub struct LabelCatalog {
    labels: Vec<Label>,
    colors: Vec<[u8; 3]>,
    shortcuts: Vec<Option<char>>,
}

impl LabelCatalog {
    /// Normalize a configured label list.
    ///
    /// Fails when the list is empty, an id is empty, or two entries share an id.
    pub fn build(entries: &[LabelEntry]) -> Result<Self> {
        if entries.is_empty() {
            return Err(ClassifyError::NoLabels);
        }

        let mut seen = HashSet::new();
        let mut labels = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let label = Label::from(entry);
            if label.id.is_empty() {
                return Err(ClassifyError::EmptyLabelId { index });
            }
            if !seen.insert(label.id.clone()) {
                return Err(ClassifyError::duplicate_label(label.id));
            }
            labels.push(label);
        }

        let colors = labels.iter().map(|label| label_color(&label.id)).collect();
        let shortcuts = assign_shortcuts(&labels, &RESERVED_KEYS);

        log::debug!(
            "🏷️ Built label catalog: {} labels, {} with shortcuts",
            labels.len(),
            shortcuts.iter().flatten().count()
        );

        Ok(Self {
            labels,
            colors,
            shortcuts,
        })
    }

    /// All labels in configuration order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True if the catalog has no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label at a position.
    pub fn get(&self, index: usize) -> Option<&Label> {
        self.labels.get(index)
    }

    /// Position of the label with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.labels.iter().position(|label| label.id == id)
    }

    /// Display color of the label at a position.
    pub fn color(&self, index: usize) -> Option<[u8; 3]> {
        self.colors.get(index).copied()
    }

    /// Shortcut character of the label at a position.
    pub fn shortcut(&self, index: usize) -> Option<char> {
        self.shortcuts.get(index).copied().flatten()
    }

    /// Shortcut character of the label with the given id.
    pub fn shortcut_for(&self, id: &str) -> Option<char> {
        self.position(id).and_then(|index| self.shortcut(index))
    }

    /// Key bindings for navigation plus this catalog's label shortcuts.
    pub fn key_bindings(&self) -> KeyBindings {
        KeyBindings::new(&self.shortcuts)
    }
}

/// Memoizes the catalog on the identity of the configured label list.
///
/// Passing the same `Arc` again returns the cached catalog; a new `Arc`
/// rebuilds even if its contents are equal.
#[derive(Debug, Default)]
pub struct CatalogCache {
    source: Option<Arc<[LabelEntry]>>,
    catalog: Option<Arc<LabelCatalog>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the catalog for `entries`, building it if the list identity changed.
    ///
    /// Returns the catalog and whether it was rebuilt.
    pub fn get_or_build(
        &mut self,
        entries: &Arc<[LabelEntry]>,
    ) -> Result<(Arc<LabelCatalog>, bool)> {
        if let (Some(source), Some(catalog)) = (&self.source, &self.catalog) {
            if Arc::ptr_eq(source, entries) {
                return Ok((Arc::clone(catalog), false));
            }
        }

        let catalog = Arc::new(LabelCatalog::build(entries)?);
        self.source = Some(Arc::clone(entries));
        self.catalog = Some(Arc::clone(&catalog));
        Ok((catalog, true))
    }

    /// The most recently built catalog, if any.
    pub fn current(&self) -> Option<&Arc<LabelCatalog>> {
        self.catalog.as_ref()
    }
}
