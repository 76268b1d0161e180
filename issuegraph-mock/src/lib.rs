//! Deterministic issue fixtures for tests and examples.
//!
//! - [`scenario`]: small hand-written datasets with known day intervals.
//! - [`github_sample_json`]: a GitHub REST style payload for loader tests.
//! - [`synthetic`]: seeded random datasets of arbitrary size.

use issuegraph_types::IssueRecord;

mod fixtures;
mod synthetic;

pub use fixtures::github::{GITHUB_SAMPLE_AS_OF, github_sample_json};
pub use synthetic::{SyntheticSpec, synthetic};

/// Names accepted by [`scenario`].
pub const SCENARIOS: [&str; 4] = ["three-issues", "same-day", "all-open", "staggered"];

/// Look up a named fixture dataset.
///
/// - `three-issues`: A created day 0 closed day 5, B created day 2 still open,
///   C created and closed on day 0.
/// - `same-day`: one issue created and closed on the same day.
/// - `all-open`: three open issues created on consecutive days.
/// - `staggered`: ten closed issues, each open for a week, one starting per day.
#[must_use]
pub fn scenario(name: &str) -> Option<Vec<IssueRecord>> {
    match name {
        "three-issues" => Some(fixtures::scenarios::three_issues()),
        "same-day" => Some(fixtures::scenarios::same_day()),
        "all-open" => Some(fixtures::scenarios::all_open()),
        "staggered" => Some(fixtures::scenarios::staggered()),
        _ => None,
    }
}
