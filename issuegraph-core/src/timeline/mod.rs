//! Issue timeline: from records to dense per-day counts.
//!
//! Modules include:
//! - `day`: timestamp parsing and day-offset arithmetic
//! - `tree`: the centered interval tree answering stabbing queries
//! - `index`: records normalized into half-open day intervals
//! - `aggregate`: dense day -> count mappings for a predicate
/// Dense per-day counting over an index.
pub mod aggregate;
/// Timestamp parsing and day-offset arithmetic.
pub mod day;
/// Interval index built from issue records.
pub mod index;
mod tree;
