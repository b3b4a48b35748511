//! Error types for the classification labeler.

use thiserror::Error;

/// Errors that can occur while configuring or driving the labeler.
///
/// Navigating past either end of the sample list is not an error; it is
/// reported to the host as a session exit instead.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// No label list was configured
    #[error("No labels defined. Add some labels in Setup to continue.")]
    NoLabels,

    /// A configured label has an empty identifier
    #[error("Label at position {index} has an empty id")]
    EmptyLabelId {
        /// Position of the offending entry in the configured list
        index: usize,
    },

    /// Two configured labels share the same identifier
    #[error("Duplicate label id '{id}'")]
    DuplicateLabel {
        /// The repeated label id
        id: String,
    },

    /// The sample sequence is empty
    #[error("No samples to classify")]
    NoSamples,

    /// An externally supplied sample index does not point at a sample
    #[error("Sample index {index} is out of range for {len} samples")]
    SampleIndexOutOfRange {
        /// The requested index
        index: usize,
        /// Number of samples available
        len: usize,
    },

    /// Session file version is newer than supported
    #[error(
        "Session file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error when reading a session file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClassifyError {
    /// Create a duplicate label error.
    pub fn duplicate_label(id: impl Into<String>) -> Self {
        Self::DuplicateLabel { id: id.into() }
    }

    /// Create an out-of-range sample index error.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::SampleIndexOutOfRange { index, len }
    }

    /// Whether this error comes from an invalid label or sample configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::NoLabels
                | Self::EmptyLabelId { .. }
                | Self::DuplicateLabel { .. }
                | Self::NoSamples
                | Self::SampleIndexOutOfRange { .. }
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClassifyError>;
