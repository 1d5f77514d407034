use std::collections::BTreeMap;

/// Diagnostic severity. Ordered from least to most severe so a
/// `MessageList` can be filtered with `>=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
    FatalError,
}

/// A single diagnostic, §6's `{code, description, source_id, severity,
/// was_fixed, location}` report entry.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub code: &'static str,
    pub description: String,
    pub source_id: String,
    pub severity: Severity,
    pub was_fixed: bool,
    pub location: BTreeMap<String, String>,
}

impl Message {
    pub fn fatal(code: &'static str, source_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            source_id: source_id.into(),
            severity: Severity::FatalError,
            was_fixed: false,
            location: BTreeMap::new(),
        }
    }

    pub fn fixed(
        code: &'static str,
        severity: Severity,
        source_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            code,
            description: description.into(),
            source_id: source_id.into(),
            severity,
            was_fixed: true,
            location: BTreeMap::new(),
        }
    }

    pub fn reported(
        code: &'static str,
        severity: Severity,
        source_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            code,
            description: description.into(),
            source_id: source_id.into(),
            severity,
            was_fixed: false,
            location: BTreeMap::new(),
        }
    }

    pub fn with_location(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.location.insert(key.into(), value.into());
        self
    }
}

pub type MessageList = Vec<Message>;
