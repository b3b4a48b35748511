//! Configuration for the classification labeler.
//!
//! The interface section describes the labels and selection mode, the
//! container section carries host options, and a session file bundles both
//! with the samples so a whole labeling run can be loaded from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ClassifyError, Result};
use crate::model::{LabelEntry, Sample};
use crate::selection::SelectionMode;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current session file format version.
/// Increment this when making breaking changes to the session format.
pub const CONFIG_VERSION: u32 = 1;

/// Label and selection-mode options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceConfig {
    /// Configured labels, bare ids or `{id, description}` records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<LabelEntry>>,

    /// Older name for `labels`, used only when `labels` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_labels: Option<Vec<LabelEntry>>,

    /// Allow more than one label per sample
    #[serde(default)]
    pub allow_multiple: bool,
}

impl InterfaceConfig {
    /// Interface with the given labels in single-select mode.
    pub fn with_labels<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<LabelEntry>,
    {
        Self {
            labels: Some(labels.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// Builder: enable or disable multi-select.
    pub fn allow_multiple(mut self, allow_multiple: bool) -> Self {
        self.allow_multiple = allow_multiple;
        self
    }

    /// The label list to use, falling back to `availableLabels`.
    pub fn resolved_labels(&self) -> Result<&[LabelEntry]> {
        self.labels
            .as_deref()
            .or(self.available_labels.as_deref())
            .ok_or(ClassifyError::NoLabels)
    }

    pub fn selection_mode(&self) -> SelectionMode {
        SelectionMode::from_allow_multiple(self.allow_multiple)
    }
}

/// Host container options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerConfig {
    /// Turn off all keyboard shortcuts
    #[serde(default)]
    pub disable_hotkeys: bool,
}

/// A complete labeling session that can be loaded from a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Version of the session file format
    pub version: u32,

    /// Label configuration
    pub interface: InterfaceConfig,

    /// Container options
    #[serde(default)]
    pub container: ContainerConfig,

    /// Samples to classify
    pub samples: Vec<Sample>,

    /// Host-controlled starting index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_index: Option<usize>,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl SessionConfig {
    /// Create a session at the current format version.
    pub fn new(interface: InterfaceConfig, samples: Vec<Sample>) -> Self {
        Self {
            version: CONFIG_VERSION,
            interface,
            container: ContainerConfig::default(),
            samples,
            sample_index: None,
            log_level: LogLevel::default(),
        }
    }

    /// Serialize the session to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a session from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ClassifyError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Read and parse a session file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded session from {:?}: {} samples",
            path,
            config.samples.len()
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session() {
        let json = r#"{
            "version": 1,
            "interface": {"labels": ["cat", {"id": "dog", "description": "Dog"}], "allowMultiple": true},
            "container": {"disableHotkeys": true},
            "samples": [{"imageUrl": "a.png"}, {"imageUrl": "b.png", "annotation": ["cat"]}],
            "sampleIndex": 1,
            "logLevel": "debug"
        }"#;

        let session = SessionConfig::from_json(json).unwrap();
        assert_eq!(session.interface.resolved_labels().unwrap().len(), 2);
        assert_eq!(session.interface.selection_mode(), SelectionMode::Multiple);
        assert!(session.container.disable_hotkeys);
        assert_eq!(session.samples.len(), 2);
        assert_eq!(session.sample_index, Some(1));
        assert_eq!(session.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_defaults() {
        let json = r#"{"version": 1, "interface": {"labels": ["cat"]}, "samples": []}"#;
        let session = SessionConfig::from_json(json).unwrap();

        assert_eq!(session.interface.selection_mode(), SelectionMode::Single);
        assert!(!session.container.disable_hotkeys);
        assert_eq!(session.sample_index, None);
        assert_eq!(session.log_level, LogLevel::Info);
    }

    #[test]
    fn test_available_labels_fallback() {
        let interface: InterfaceConfig =
            serde_json::from_str(r#"{"availableLabels": ["a", "b"]}"#).unwrap();
        assert_eq!(interface.resolved_labels().unwrap().len(), 2);

        let interface: InterfaceConfig =
            serde_json::from_str(r#"{"labels": ["x"], "availableLabels": ["a", "b"]}"#).unwrap();
        assert_eq!(interface.resolved_labels().unwrap(), &[LabelEntry::from("x")]);
    }

    #[test]
    fn test_missing_labels_is_error() {
        let interface = InterfaceConfig::default();
        assert!(matches!(
            interface.resolved_labels(),
            Err(ClassifyError::NoLabels)
        ));
    }

    #[test]
    fn test_version_too_new() {
        let json = r#"{"version": 99, "interface": {}, "samples": []}"#;
        assert!(matches!(
            SessionConfig::from_json(json),
            Err(ClassifyError::VersionTooNew { file_version: 99, .. })
        ));
    }

    #[test]
    fn test_session_json_roundtrip() {
        let session = SessionConfig::new(
            InterfaceConfig::with_labels(["cat", "dog"]).allow_multiple(true),
            vec![Sample::new("a.png")],
        );
        let parsed = SessionConfig::from_json(&session.to_json().unwrap()).unwrap();
        assert_eq!(parsed.interface, session.interface);
        assert_eq!(parsed.samples, session.samples);
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    }
}
