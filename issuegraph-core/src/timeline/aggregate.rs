use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::day::DayOffset;
use super::index::IntervalIndex;
use crate::progress::{NoProgress, Phase, ProgressObserver};
use crate::{IssueRecord, IssueStatus};

/// Dense day -> count mapping over a contiguous inclusive day range.
///
/// Stored as a start day plus one count per day, so there are no gaps by
/// construction and iteration is ascending by day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCountMapping {
    start: DayOffset,
    counts: Vec<usize>,
}

impl DayCountMapping {
    /// First day covered.
    #[must_use]
    pub const fn start(&self) -> DayOffset {
        self.start
    }

    /// Last day covered (inclusive).
    #[must_use]
    pub fn end(&self) -> DayOffset {
        self.start + self.counts.len() as DayOffset - 1
    }

    /// Number of days covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the mapping covers no day.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Count for `day`, or `None` outside the range.
    #[must_use]
    pub fn get(&self, day: DayOffset) -> Option<usize> {
        let i = usize::try_from(day.checked_sub(self.start)?).ok()?;
        self.counts.get(i).copied()
    }

    /// `(day, count)` pairs in ascending day order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (DayOffset, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &count)| (self.start + i as DayOffset, count))
    }

    /// Days in ascending order.
    pub fn days(&self) -> impl Iterator<Item = DayOffset> + '_ {
        self.iter().map(|(d, _)| d)
    }

    /// Counts in ascending day order.
    #[must_use]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Largest count, or 0 for an empty mapping.
    #[must_use]
    pub fn peak(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Copy into an ordered map.
    #[must_use]
    pub fn to_btree(&self) -> BTreeMap<DayOffset, usize> {
        self.iter().collect()
    }
}

/// Small cache of counts known without walking the index, keyed by day.
///
/// A seeded day is reported verbatim by [`aggregate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryCache {
    entries: BTreeMap<DayOffset, usize>,
}

impl BoundaryCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Predicate counts at the first and last day of `index.day_range()`.
    pub fn for_predicate<P>(index: &IntervalIndex<'_>, predicate: P) -> Self
    where
        P: Fn(&IssueRecord) -> bool,
    {
        let (start, end) = index.day_range();
        let mut cache = Self::new();
        cache.insert(start, index.count_at_where(start, &predicate));
        cache.insert(end, index.count_at_where(end, &predicate));
        cache
    }

    /// Record a known count for `day`.
    pub fn insert(&mut self, day: DayOffset, count: usize) -> &mut Self {
        self.entries.insert(day, count);
        self
    }

    /// Cached count for `day`.
    #[must_use]
    pub fn get(&self, day: DayOffset) -> Option<usize> {
        self.entries.get(&day).copied()
    }

    /// Number of cached days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Count, for every day of `index.day_range()`, the covering intervals whose
/// record satisfies `predicate`.
///
/// Days present in `seed` take the cached count. The result has exactly one
/// entry per day from `min_begin()` to `effective_max_end()`.
///
/// The walk evaluates `predicate` once per interval, then sweeps the sorted
/// begin and end days with a running count, so it costs O(N log N + D) rather
/// than a stabbing query per day. The counts are identical to
/// `index.count_at_where(day, predicate)`.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use issuegraph_core::{IntervalIndex, IssueRecord, aggregate};
///
/// let records = [IssueRecord::closed("2020-01-01", "2020-01-01")];
/// let index = IntervalIndex::build(&records, Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).unwrap())?;
/// let closed = aggregate(&index, |r| !r.is_open(), None);
/// assert_eq!(closed.to_btree().into_iter().collect::<Vec<_>>(), vec![(0, 1)]);
/// # Ok::<(), issuegraph_core::IssuegraphError>(())
/// ```
pub fn aggregate<P>(
    index: &IntervalIndex<'_>,
    predicate: P,
    seed: Option<&BoundaryCache>,
) -> DayCountMapping
where
    P: Fn(&IssueRecord) -> bool,
{
    aggregate_observed(index, predicate, seed, "custom", &mut NoProgress)
}

/// Like [`aggregate`], reporting one step per day to `progress` under `label`.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "issuegraph_core::aggregate",
        skip(index, predicate, seed, progress),
        fields(intervals = index.len(), seeded = seed.map_or(0, BoundaryCache::len)),
    )
)]
pub fn aggregate_observed<P>(
    index: &IntervalIndex<'_>,
    predicate: P,
    seed: Option<&BoundaryCache>,
    label: &str,
    progress: &mut dyn ProgressObserver,
) -> DayCountMapping
where
    P: Fn(&IssueRecord) -> bool,
{
    let (start, end) = index.day_range();

    let mut begins = Vec::new();
    let mut ends = Vec::new();
    for iv in index.intervals() {
        if predicate(iv.record) {
            begins.push(iv.begin);
            ends.push(iv.end);
        }
    }
    begins.sort_unstable();
    ends.sort_unstable();

    let total = usize::try_from(end - start + 1).unwrap_or(0);
    let phase = Phase::Aggregate {
        label: label.to_string(),
    };
    progress.on_start(&phase, total);

    let mut counts = Vec::with_capacity(total);
    let (mut bi, mut ei, mut active) = (0usize, 0usize, 0usize);
    for day in start..=end {
        while bi < begins.len() && begins[bi] <= day {
            active += 1;
            bi += 1;
        }
        // Every interval ending by `day` began before it, so it was counted above.
        while ei < ends.len() && ends[ei] <= day {
            active -= 1;
            ei += 1;
        }
        counts.push(seed.and_then(|s| s.get(day)).unwrap_or(active));
        progress.on_advance(&phase, counts.len());
    }
    progress.on_finish(&phase);

    DayCountMapping { start, counts }
}

/// Open and closed issue counts over the same day range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTimeline {
    /// Issues with status `open` per day.
    pub open: DayCountMapping,
    /// Issues with status `closed` per day.
    pub closed: DayCountMapping,
}

impl StatusTimeline {
    /// Aggregate both statuses, optionally seeding each walk with its boundary counts.
    pub fn compute(
        index: &IntervalIndex<'_>,
        seed_boundaries: bool,
        progress: &mut dyn ProgressObserver,
    ) -> Self {
        let mut by_status = |status: IssueStatus| {
            let predicate = |r: &IssueRecord| r.status == status;
            let seed = seed_boundaries.then(|| BoundaryCache::for_predicate(index, predicate));
            let label = format!("status = {status}");
            aggregate_observed(index, predicate, seed.as_ref(), &label, progress)
        };
        let open = by_status(IssueStatus::Open);
        let closed = by_status(IssueStatus::Closed);
        Self { open, closed }
    }

    /// `(day, open, closed)` for every day, ascending.
    pub fn combined(&self) -> impl Iterator<Item = (DayOffset, usize, usize)> + '_ {
        self.open
            .iter()
            .zip(self.closed.counts().iter().copied())
            .map(|((day, open), closed)| (day, open, closed))
    }

    /// Total issues (open + closed) covering each day.
    #[must_use]
    pub fn totals(&self) -> DayCountMapping {
        DayCountMapping {
            start: self.open.start,
            counts: self.combined().map(|(_, o, c)| o + c).collect(),
        }
    }
}
