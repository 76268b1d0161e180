//! Issuegraph turns a dump of GitHub-style issues into per-day counts.
//!
//! Overview
//! - Each issue's lifetime becomes a half-open day interval `[created, closed)`,
//!   with open issues ending at an explicit "now".
//! - The intervals are stored in a centered interval tree, so "which issues were
//!   alive on day d" costs `O(log N + k)`.
//! - Per-day series (open, closed, or any `key == value` attribute filter) are
//!   computed with a single sweep over sorted boundaries rather than one stab
//!   per day.
//! - Results are written as small JSON chart documents that any plotting tool
//!   can render.
//!
//! Key behaviors and trade-offs
//! - Day numbering: day 0 is the wall-clock day of the earliest creation. By
//!   default each timestamp's own UTC offset is dropped before counting days;
//!   pass a timezone to count in one fixed zone instead.
//! - Same-day issues: an issue closed on the day it was created is widened to
//!   a one-day interval so it still counts on that day.
//! - Open issues: an `open` record ends at the configured "now" even when it
//!   still carries a `closed_at` from an earlier close.
//! - Boundary seeding: the first and last day of each series are taken from a
//!   direct stab of the index. With half-open intervals this matches the sweep;
//!   it can be switched off.
//!
//! Examples
//! Computing the open/closed timeline of a dump and writing its charts:
//! ```rust,ignore
//! use issuegraph::{ArtifactWriter, IssueGraph, loader};
//!
//! let graph = IssueGraph::builder()
//!     .records(loader::load_records("issues.json")?)
//!     .timezone("Europe/Rome")
//!     .filter("kind=bug".parse()?)
//!     .build()?;
//! let report = graph.compute()?;
//! for (day, open, closed) in report.timeline.combined() {
//!     println!("{day}: {open} open, {closed} closed");
//! }
//! ArtifactWriter::new("out").write_report(&report)?;
//! ```
//!
//! Querying the index directly:
//! ```rust,ignore
//! let index = graph.index()?;
//! for iv in index.stab(3) {
//!     println!("alive on day 3: {:?}", iv.record.attribute("title"));
//! }
//! ```
//!
//! See `issuegraph/demos/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
pub mod export;
pub mod loader;
#[cfg(feature = "tracing")]
pub mod progress;

pub use core::{FilteredSeries, GraphReport, IssueGraph, IssueGraphBuilder};
pub use export::{ArtifactWriter, ChartDocument, SeriesDocument};
#[cfg(feature = "tracing")]
pub use progress::LogProgress;

// Re-export core types for convenience
pub use issuegraph_core::{
    AttributeFilter, BoundaryCache, DayBoundary, DayCountMapping, DayOffset, GraphConfig,
    Interval, IntervalIndex, IntervalIndexBuilder, IssueRecord, IssueStatus, IssuegraphError,
    NoProgress, Phase, ProgressObserver, StatusTimeline, Timestamp, Tz, aggregate,
    aggregate_observed, parse_timestamp,
};
