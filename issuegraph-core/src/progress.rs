//! Progress observation for the index build and the aggregation walk.
//!
//! Observers are told when a phase starts, how far it got, and when it ends.
//! They cannot influence the computation; every hook defaults to a no-op so an
//! implementation only overrides what it cares about.

use std::fmt;

/// A long-running loop that reports progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Normalizing records into intervals (one step per record).
    BuildIndex,
    /// Walking the day range for one predicate (one step per day).
    Aggregate {
        /// Human-readable predicate label, e.g. `status = open`.
        label: String,
    },
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuildIndex => write!(f, "building interval index"),
            Self::Aggregate { label } => write!(f, "counting \"{label}\" issues per day"),
        }
    }
}

/// Observer for build and aggregation progress.
///
/// Methods take `&mut self`; observers are single-threaded.
pub trait ProgressObserver {
    /// Called once before the first step of `phase`; `total` is the number of steps.
    fn on_start(&mut self, _phase: &Phase, _total: usize) {}
    /// Called after each step; `done` counts completed steps.
    fn on_advance(&mut self, _phase: &Phase, _done: usize) {}
    /// Called once after the last step of `phase`.
    fn on_finish(&mut self, _phase: &Phase) {}
}

/// Observer that ignores every event.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}
