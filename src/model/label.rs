//! Label data model for classification labels.

use serde::{Deserialize, Serialize};

/// A label as it appears in configuration: either a bare id or a record.
///
/// A bare string `"cat"` is shorthand for `{ "id": "cat", "description": "cat" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelEntry {
    /// Bare label id, also used as the description
    Id(String),
    /// Structured label with an optional description
    Record {
        /// Unique identifier for the label
        id: String,
        /// Human-readable description
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl LabelEntry {
    /// The id this entry will normalize to.
    pub fn id(&self) -> &str {
        match self {
            LabelEntry::Id(id) => id,
            LabelEntry::Record { id, .. } => id,
        }
    }
}

impl From<&str> for LabelEntry {
    fn from(id: &str) -> Self {
        LabelEntry::Id(id.to_string())
    }
}

/// A selectable classification label. Identity is the `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    /// Unique identifier for the label
    pub id: String,
    /// Display description of the label
    pub description: String,
}

impl Label {
    /// Create a new label with the given id and description.
    pub fn new(id: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
        }
    }
}

impl From<&LabelEntry> for Label {
    fn from(entry: &LabelEntry) -> Self {
        match entry {
            LabelEntry::Id(id) => Label::new(id, id),
            LabelEntry::Record { id, description } => {
                Label::new(id, description.as_deref().unwrap_or(id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_string_uses_id_as_description() {
        let label = Label::from(&LabelEntry::from("cat"));
        assert_eq!(label, Label::new("cat", "cat"));
    }

    #[test]
    fn test_deserialize_mixed_entries() {
        let entries: Vec<LabelEntry> = serde_json::from_str(
            r#"["cat", {"id": "dog", "description": "A dog"}, {"id": "fox"}]"#,
        )
        .unwrap();

        let labels: Vec<Label> = entries.iter().map(Label::from).collect();
        assert_eq!(labels[0], Label::new("cat", "cat"));
        assert_eq!(labels[1], Label::new("dog", "A dog"));
        assert_eq!(labels[2], Label::new("fox", "fox"));
    }
}
