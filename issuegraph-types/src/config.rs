//! Configuration shared by the facade and the CLI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AttributeFilter;

/// Global configuration for an `IssueGraph` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Instant standing in for "now" when computing the end of open issues.
    ///
    /// `None` means the current UTC time, sampled once when the graph is built.
    pub as_of: Option<DateTime<Utc>>,
    /// IANA timezone used to place day boundaries (e.g. `Europe/Rome`).
    ///
    /// `None` counts days on each timestamp's own wall clock, ignoring its offset.
    pub timezone: Option<String>,
    /// Seed each aggregation with the counts at the two boundary days.
    pub seed_boundaries: bool,
    /// Extra `key == value` series to compute next to the open/closed pair.
    pub filters: Vec<AttributeFilter>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            as_of: None,
            timezone: None,
            seed_boundaries: true,
            filters: Vec::new(),
        }
    }
}
