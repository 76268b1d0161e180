//! Issuegraph-specific records, filters, and configuration primitives.
#![warn(missing_docs)]

mod config;
mod filter;
mod record;

pub use config::GraphConfig;
pub use filter::AttributeFilter;
pub use record::{IssueRecord, IssueStatus};

pub mod error;
pub use error::IssuegraphError;
