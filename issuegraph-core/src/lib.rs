//! issuegraph-core
//!
//! Interval index and day-by-day aggregation over issue open periods.
//!
//! - `types`: records, filters, configuration and the error type (re-exported
//!   from `issuegraph-types`).
//! - `timeline`: day-offset normalization, the stabbing-queryable interval
//!   index, and the per-day aggregator.
//! - `progress`: optional observer hooks around the build and aggregation loops.
//!
//! Everything here is synchronous and single-threaded. The index borrows the
//! records it was built from and is immutable once built, so it can be shared
//! freely across queries.
#![warn(missing_docs)]

/// Progress observer hooks for long-running loops.
pub mod progress;
/// Day normalization, interval index and aggregation.
pub mod timeline;
pub mod types;

pub use progress::{NoProgress, Phase, ProgressObserver};
pub use timeline::aggregate::{
    BoundaryCache, DayCountMapping, StatusTimeline, aggregate, aggregate_observed,
};
pub use timeline::day::{DayBoundary, DayOffset, Timestamp, parse_timestamp};
pub use timeline::index::{Interval, IntervalIndex, IntervalIndexBuilder};
pub use types::*;
