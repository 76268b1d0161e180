use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{IssueRecord, IssueStatus, IssuegraphError};

/// Equality predicate over a named record attribute: `key == value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFilter {
    /// Attribute name, resolved through [`IssueRecord::attribute`].
    pub key: String,
    /// Value the attribute must equal.
    pub value: Value,
}

impl AttributeFilter {
    /// Build a filter for `key == value`.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Filter on the issue status.
    #[must_use]
    pub fn status(status: IssueStatus) -> Self {
        Self::new("status", status.as_str())
    }

    /// Whether `record` satisfies the filter. A missing attribute never matches.
    #[must_use]
    pub fn matches(&self, record: &IssueRecord) -> bool {
        record
            .attribute(&self.key)
            .is_some_and(|v| v.as_ref() == &self.value)
    }

    /// Short human-readable label, e.g. `status = open`.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.value {
            Value::String(s) => format!("{} = {s}", self.key),
            other => format!("{} = {other}", self.key),
        }
    }
}

impl fmt::Display for AttributeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Parses `key=value`. The value is read as JSON when it is valid JSON
/// (`true`, `42`, `"x"`), and as a plain string otherwise.
impl FromStr for AttributeFilter {
    type Err = IssuegraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, raw) = s.split_once('=').ok_or_else(|| {
            IssuegraphError::InvalidArg(format!("expected key=value, got '{s}'"))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(IssuegraphError::InvalidArg(format!(
                "empty attribute name in '{s}'"
            )));
        }
        let raw = raw.trim();
        let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::from(raw));
        Ok(Self::new(key, value))
    }
}
