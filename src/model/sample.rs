//! Sample and annotation data model.

use serde::{Deserialize, Serialize};

/// A stored classification: one label id or a list of label ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Annotation {
    /// Single-select output
    Single(String),
    /// Multi-select output, in selection order
    Multiple(Vec<String>),
}

impl Annotation {
    /// Label ids contained in this annotation, in order.
    pub fn ids(&self) -> &[String] {
        match self {
            Annotation::Single(id) => std::slice::from_ref(id),
            Annotation::Multiple(ids) => ids,
        }
    }

    /// Whether the annotation contains the given label id.
    pub fn contains(&self, id: &str) -> bool {
        self.ids().iter().any(|existing| existing == id)
    }

    /// True for an empty multi-select list.
    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }
}

/// A sample to classify. Owned by the host; never mutated by the labeler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    /// URL or path of the image to display
    pub image_url: String,
    /// Previously stored classification, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<Annotation>,
}

impl Sample {
    /// Create an unannotated sample.
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            annotation: None,
        }
    }

    /// Builder: attach a stored annotation.
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotation = Some(annotation);
        self
    }
}
