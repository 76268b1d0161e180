//! Issue records as consumed by the interval index.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle state of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    /// The issue is still open; its interval runs until the as-of instant.
    Open,
    /// The issue was closed at `closed_at`.
    Closed,
}

impl IssueStatus {
    /// Canonical lowercase name, as found in GitHub payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single issue: fixed timestamp/status fields plus an open-ended attribute bag.
///
/// Deserializes directly from a GitHub issue object. The `state` key is
/// accepted for `status`; every other unknown key lands in `attributes`.
/// Timestamps are kept verbatim and parsed when the index is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueRecord {
    /// Creation timestamp (required).
    pub created_at: String,
    /// Closure timestamp; present iff `status` is `Closed`.
    #[serde(default)]
    pub closed_at: Option<String>,
    /// Open/closed flag.
    #[serde(alias = "state")]
    pub status: IssueStatus,
    /// Any additional named attributes (title, labels, user, ...).
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl IssueRecord {
    /// An open issue created at `created_at`.
    pub fn open(created_at: impl Into<String>) -> Self {
        Self {
            created_at: created_at.into(),
            closed_at: None,
            status: IssueStatus::Open,
            attributes: Map::new(),
        }
    }

    /// A closed issue with both timestamps.
    pub fn closed(created_at: impl Into<String>, closed_at: impl Into<String>) -> Self {
        Self {
            created_at: created_at.into(),
            closed_at: Some(closed_at.into()),
            status: IssueStatus::Closed,
            attributes: Map::new(),
        }
    }

    /// Attach an extra attribute, replacing any previous value under `key`.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Look up a named attribute.
    ///
    /// `status` (or `state`), `created_at` and `closed_at` resolve to the fixed
    /// fields; any other key is looked up in the attribute bag. A closed-at of
    /// `None` resolves to `Value::Null`, mirroring the GitHub payload.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<Cow<'_, Value>> {
        match key {
            "status" | "state" => Some(Cow::Owned(Value::from(self.status.as_str()))),
            "created_at" => Some(Cow::Owned(Value::from(self.created_at.as_str()))),
            "closed_at" => Some(Cow::Owned(
                self.closed_at.as_deref().map_or(Value::Null, Value::from),
            )),
            other => self.attributes.get(other).map(Cow::Borrowed),
        }
    }

    /// Convenience: `true` when the record is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == IssueStatus::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn github_payload_uses_state_alias_and_keeps_extras() {
        let json = r#"{
            "number": 7,
            "title": "crash on start",
            "state": "closed",
            "created_at": "2021-03-01T10:00:00Z",
            "closed_at": "2021-03-04T09:00:00Z",
            "labels": ["bug"]
        }"#;
        let rec: IssueRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.status, IssueStatus::Closed);
        assert_eq!(rec.closed_at.as_deref(), Some("2021-03-04T09:00:00Z"));
        assert_eq!(rec.attribute("number").unwrap().as_ref(), &Value::from(7));
        assert_eq!(rec.attribute("state").unwrap().as_ref(), &Value::from("closed"));
        assert!(rec.attribute("milestone").is_none());
    }

    #[test]
    fn open_issue_has_null_closed_at() {
        let json = r#"{"state": "open", "created_at": "2021-03-01", "closed_at": null}"#;
        let rec: IssueRecord = serde_json::from_str(json).unwrap();
        assert!(rec.is_open());
        assert_eq!(rec.attribute("closed_at").unwrap().as_ref(), &Value::Null);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let json = r#"{"state": "merged", "created_at": "2021-03-01"}"#;
        assert!(serde_json::from_str::<IssueRecord>(json).is_err());
    }
}
