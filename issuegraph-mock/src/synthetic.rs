use chrono::{DateTime, Duration, SecondsFormat, Utc};
use issuegraph_types::IssueRecord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shape of a generated dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticSpec {
    /// Number of issues.
    pub issues: usize,
    /// Creation instants are spread over this many days after `start`.
    pub span_days: i64,
    /// Longest lifetime of a closed issue, in days.
    pub max_lifetime_days: i64,
    /// Percentage [0, 100] of issues left open.
    pub open_percent: u8,
    /// Seed for the random generator; equal seeds give equal datasets.
    pub seed: u64,
}

impl Default for SyntheticSpec {
    fn default() -> Self {
        Self {
            issues: 1_000,
            span_days: 365,
            max_lifetime_days: 90,
            open_percent: 20,
            seed: 7,
        }
    }
}

/// Generate `spec.issues` records starting at 2020-01-01T00:00:00Z.
///
/// Closed issues end between zero seconds and `max_lifetime_days` after
/// creation, so same-day closures are common. Every record carries a
/// `number` and a `label` attribute (`bug`, `feature` or `question`).
#[must_use]
pub fn synthetic(spec: SyntheticSpec) -> Vec<IssueRecord> {
    let mut rng = StdRng::seed_from_u64(spec.seed);
    let start = DateTime::<Utc>::from_timestamp(1_577_836_800, 0).unwrap_or_default();
    let span_secs = spec.span_days.max(1) * 86_400;
    let life_secs = spec.max_lifetime_days.max(0) * 86_400;
    let labels = ["bug", "feature", "question"];

    (0..spec.issues)
        .map(|n| {
            let created = start + Duration::seconds(rng.random_range(0..span_secs));
            let label = labels[rng.random_range(0..labels.len())];
            let record = if rng.random_range(0..100u8) < spec.open_percent {
                IssueRecord::open(rfc3339(created))
            } else {
                let closed = created + Duration::seconds(rng.random_range(0..=life_secs));
                IssueRecord::closed(rfc3339(created), rfc3339(closed))
            };
            record
                .with_attribute("number", n + 1)
                .with_attribute("label", label)
        })
        .collect()
}

fn rfc3339(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}
