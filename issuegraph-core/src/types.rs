//! Re-export of foundational types from `issuegraph-types`.
// Consolidated re-exports so downstream crates can depend on `issuegraph-core` only

pub use issuegraph_types::{
    AttributeFilter, GraphConfig, IssueRecord, IssueStatus, IssuegraphError,
};

pub use chrono_tz::Tz;
