use chrono::{DateTime, NaiveDateTime, Utc};

use super::day::{DayBoundary, DayOffset, days_between, parse_timestamp};
use super::tree::{CenteredTree, Span};
use crate::progress::{NoProgress, Phase, ProgressObserver};
use crate::{IssueRecord, IssueStatus, IssuegraphError};

/// An issue's open period as a half-open day interval `[begin, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<'r> {
    /// First covered day.
    pub begin: DayOffset,
    /// First day no longer covered; always greater than `begin`.
    pub end: DayOffset,
    /// The natural end equalled `begin` and was pushed out by one day.
    pub widened: bool,
    /// Position of the originating record in the build input.
    pub position: usize,
    /// The originating record.
    pub record: &'r IssueRecord,
}

impl Interval<'_> {
    /// Whether `day` lies in `[begin, end)`.
    #[must_use]
    pub const fn contains(&self, day: DayOffset) -> bool {
        self.begin <= day && day < self.end
    }

    /// Number of covered days.
    #[must_use]
    pub const fn len(&self) -> DayOffset {
        self.end - self.begin
    }

    /// Always `false`; intervals are widened to at least one day.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// Stabbing-queryable index over issue intervals.
///
/// Built once from borrowed records and immutable afterwards. Day offsets
/// are anchored at [`epoch`](Self::epoch), the earliest creation instant.
#[derive(Debug, Clone)]
pub struct IntervalIndex<'r> {
    epoch: NaiveDateTime,
    as_of: DateTime<Utc>,
    boundary: DayBoundary,
    intervals: Vec<Interval<'r>>,
    tree: CenteredTree,
    min_begin: DayOffset,
    max_end: DayOffset,
}

impl<'r> IntervalIndex<'r> {
    /// Build an index from `records` in one call.
    ///
    /// Open issues run until `as_of`; days follow `DayBoundary::Wall`.
    ///
    /// # Errors
    /// - `EmptyInput` if `records` is empty.
    /// - `MalformedInput` if a creation timestamp is missing or unparseable, a
    ///   closed record lacks a parseable `closed_at`, or an interval would end
    ///   before the day it begins.
    pub fn build<I>(records: I, as_of: DateTime<Utc>) -> Result<Self, IssuegraphError>
    where
        I: IntoIterator<Item = &'r IssueRecord>,
    {
        let mut builder = IntervalIndexBuilder::new(as_of);
        builder.extend(records);
        builder.build()
    }

    /// Start a builder with the given as-of instant.
    #[must_use]
    pub const fn builder(as_of: DateTime<Utc>) -> IntervalIndexBuilder<'r> {
        IntervalIndexBuilder::new(as_of)
    }

    /// Wall-clock datetime of the earliest creation; day 0 starts here.
    #[must_use]
    pub const fn epoch(&self) -> NaiveDateTime {
        self.epoch
    }

    /// The instant used as "now" for open issues.
    #[must_use]
    pub const fn as_of(&self) -> DateTime<Utc> {
        self.as_of
    }

    /// Day boundary mode the offsets were computed with.
    #[must_use]
    pub const fn day_boundary(&self) -> DayBoundary {
        self.boundary
    }

    /// All intervals, in input order.
    #[must_use]
    pub fn intervals(&self) -> &[Interval<'r>] {
        &self.intervals
    }

    /// Number of intervals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Always `false` for a successfully built index.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Smallest `begin` over all intervals.
    #[must_use]
    pub const fn min_begin(&self) -> DayOffset {
        self.min_begin
    }

    /// Largest `end` over all intervals.
    #[must_use]
    pub const fn max_end(&self) -> DayOffset {
        self.max_end
    }

    /// Last day worth reporting: `max_end() - 1` when nothing covers `max_end()`.
    #[must_use]
    pub fn effective_max_end(&self) -> DayOffset {
        if self.count_at(self.max_end) == 0 {
            self.max_end - 1
        } else {
            self.max_end
        }
    }

    /// Inclusive day range walked by the aggregator.
    #[must_use]
    pub fn day_range(&self) -> (DayOffset, DayOffset) {
        (self.min_begin, self.effective_max_end())
    }

    /// Every interval with `begin <= day < end`, in input order.
    #[must_use]
    pub fn stab(&self, day: DayOffset) -> Vec<&Interval<'r>> {
        let mut hits = Vec::new();
        self.tree.for_each_covering(day, |i| hits.push(i));
        hits.sort_unstable();
        hits.into_iter().map(|i| &self.intervals[i]).collect()
    }

    /// Number of intervals covering `day`.
    #[must_use]
    pub fn count_at(&self, day: DayOffset) -> usize {
        let mut n = 0;
        self.tree.for_each_covering(day, |_| n += 1);
        n
    }

    /// Number of intervals covering `day` whose record satisfies `predicate`.
    pub fn count_at_where<P>(&self, day: DayOffset, predicate: P) -> usize
    where
        P: Fn(&IssueRecord) -> bool,
    {
        let mut n = 0;
        self.tree.for_each_covering(day, |i| {
            if predicate(self.intervals[i].record) {
                n += 1;
            }
        });
        n
    }
}

/// Collects records and normalizes them into an [`IntervalIndex`].
///
/// Insertion is build-time only; nothing is parsed until [`build`](Self::build)
/// because the epoch depends on every record.
#[derive(Debug, Clone)]
pub struct IntervalIndexBuilder<'r> {
    records: Vec<&'r IssueRecord>,
    as_of: DateTime<Utc>,
    boundary: DayBoundary,
}

impl<'r> IntervalIndexBuilder<'r> {
    /// New builder; open issues will run until `as_of`.
    #[must_use]
    pub const fn new(as_of: DateTime<Utc>) -> Self {
        Self {
            records: Vec::new(),
            as_of,
            boundary: DayBoundary::Wall,
        }
    }

    /// Select how instants are mapped to days.
    #[must_use]
    pub const fn day_boundary(mut self, boundary: DayBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Queue one record.
    pub fn insert(&mut self, record: &'r IssueRecord) -> &mut Self {
        self.records.push(record);
        self
    }

    /// Number of queued records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record has been queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Normalize all queued records and build the index.
    ///
    /// # Errors
    /// See [`IntervalIndex::build`].
    pub fn build(self) -> Result<IntervalIndex<'r>, IssuegraphError> {
        self.build_observed(&mut NoProgress)
    }

    /// Like [`build`](Self::build), reporting one step per record to `progress`.
    ///
    /// # Errors
    /// See [`IntervalIndex::build`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "issuegraph_core::index::build",
            skip_all,
            fields(records = self.records.len(), as_of = %self.as_of),
        )
    )]
    pub fn build_observed(
        self,
        progress: &mut dyn ProgressObserver,
    ) -> Result<IntervalIndex<'r>, IssuegraphError> {
        if self.records.is_empty() {
            return Err(IssuegraphError::EmptyInput);
        }

        let created = self
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| self.wall_clock(i, "created_at", Some(&r.created_at)))
            .collect::<Result<Vec<_>, _>>()?;
        let epoch = created
            .iter()
            .copied()
            .min()
            .ok_or(IssuegraphError::EmptyInput)?;
        let now = self.boundary.wall_clock_utc(self.as_of);

        let phase = Phase::BuildIndex;
        progress.on_start(&phase, self.records.len());

        let mut intervals = Vec::with_capacity(self.records.len());
        for (position, (&record, created)) in self.records.iter().zip(created).enumerate() {
            // Reopened issues keep a stale closed_at; only the status decides.
            let closed = match record.status {
                IssueStatus::Closed => {
                    self.wall_clock(position, "closed_at", record.closed_at.as_deref())?
                }
                IssueStatus::Open => now,
            };
            let begin = days_between(epoch, created);
            let natural_end = days_between(epoch, closed);
            if natural_end < begin {
                return Err(IssuegraphError::malformed(
                    position,
                    format!("ends on day {natural_end}, before it begins on day {begin}"),
                ));
            }
            let widened = natural_end == begin;
            let end = if widened { begin + 1 } else { natural_end };
            #[cfg(feature = "tracing")]
            if widened {
                tracing::debug!(position, begin, "widened same-day interval");
            }
            intervals.push(Interval {
                begin,
                end,
                widened,
                position,
                record,
            });
            progress.on_advance(&phase, position + 1);
        }

        let min_begin = intervals.iter().map(|iv| iv.begin).min().unwrap_or(0);
        let max_end = intervals.iter().map(|iv| iv.end).max().unwrap_or(0);
        let tree = CenteredTree::new(
            intervals
                .iter()
                .map(|iv| Span {
                    begin: iv.begin,
                    end: iv.end,
                })
                .collect(),
        );
        progress.on_finish(&phase);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            intervals = intervals.len(),
            widened = intervals.iter().filter(|iv| iv.widened).count(),
            min_begin,
            max_end,
            "interval index built"
        );

        Ok(IntervalIndex {
            epoch,
            as_of: self.as_of,
            boundary: self.boundary,
            intervals,
            tree,
            min_begin,
            max_end,
        })
    }

    fn wall_clock(
        &self,
        position: usize,
        field: &str,
        raw: Option<&str>,
    ) -> Result<NaiveDateTime, IssuegraphError> {
        let raw =
            raw.ok_or_else(|| IssuegraphError::malformed(position, format!("missing {field}")))?;
        let ts = parse_timestamp(raw).ok_or_else(|| {
            IssuegraphError::malformed(position, format!("unparseable {field} '{raw}'"))
        })?;
        Ok(self.boundary.wall_clock(ts))
    }
}

impl<'r> Extend<&'r IssueRecord> for IntervalIndexBuilder<'r> {
    fn extend<T: IntoIterator<Item = &'r IssueRecord>>(&mut self, iter: T) {
        self.records.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 11, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = IntervalIndex::build(std::iter::empty(), as_of()).unwrap_err();
        assert_eq!(err, IssuegraphError::EmptyInput);
    }

    #[test]
    fn epoch_is_minimum_not_first() {
        let records = [
            IssueRecord::closed("2020-01-05T00:00:00Z", "2020-01-07T00:00:00Z"),
            IssueRecord::closed("2020-01-02T00:00:00Z", "2020-01-03T00:00:00Z"),
        ];
        let index = IntervalIndex::build(&records, as_of()).unwrap();
        assert_eq!(index.epoch().to_string(), "2020-01-02 00:00:00");
        let iv = index.intervals();
        assert_eq!((iv[0].begin, iv[0].end), (3, 5));
        assert_eq!((iv[1].begin, iv[1].end), (0, 1));
        assert_eq!(index.min_begin(), 0);
        assert_eq!(index.max_end(), 5);
    }

    #[test]
    fn closed_without_closed_at_is_malformed() {
        let mut rec = IssueRecord::closed("2020-01-01", "2020-01-02");
        rec.closed_at = None;
        let records = [IssueRecord::open("2020-01-01"), rec];
        let err = IntervalIndex::build(&records, as_of()).unwrap_err();
        assert!(matches!(err, IssuegraphError::MalformedInput { index: 1, .. }));
    }

    #[test]
    fn unparseable_created_at_is_malformed() {
        let records = [IssueRecord::open("last tuesday")];
        let err = IntervalIndex::build(&records, as_of()).unwrap_err();
        assert!(matches!(err, IssuegraphError::MalformedInput { index: 0, .. }));
    }

    #[test]
    fn closure_before_creation_is_malformed() {
        let records = [IssueRecord::closed("2020-01-05", "2020-01-03")];
        let err = IntervalIndex::build(&records, as_of()).unwrap_err();
        assert!(matches!(err, IssuegraphError::MalformedInput { index: 0, .. }));
    }

    #[test]
    fn reopened_issue_ignores_stale_closed_at() {
        let mut rec = IssueRecord::open("2020-01-01T12:00:00Z");
        rec.closed_at = Some("2020-01-02T12:00:00Z".into());
        let records = [rec];
        let index = IntervalIndex::build(&records, as_of()).unwrap();
        assert_eq!(index.intervals()[0].end, 10);
    }

    #[test]
    fn zone_boundary_shifts_days() {
        let records = [IssueRecord::closed(
            "2020-01-01T10:00:00Z",
            "2020-01-02T09:00:00-05:00",
        )];
        let wall = IntervalIndex::build(&records, as_of()).unwrap();
        assert_eq!(wall.intervals()[0].end, 1);
        assert!(wall.intervals()[0].widened);

        let mut builder =
            IntervalIndex::builder(as_of()).day_boundary(DayBoundary::Zone(chrono_tz::UTC));
        builder.extend(&records);
        let zoned = builder.build().unwrap();
        assert_eq!(zoned.intervals()[0].end, 1);
        assert!(!zoned.intervals()[0].widened);
    }

    #[test]
    fn counts_match_stab() {
        let records = [
            IssueRecord::closed("2020-01-01", "2020-01-06"),
            IssueRecord::open("2020-01-03"),
            IssueRecord::closed("2020-01-01", "2020-01-01"),
        ];
        let index = IntervalIndex::build(&records, as_of()).unwrap();
        for day in -1..=12 {
            assert_eq!(index.count_at(day), index.stab(day).len());
            assert_eq!(
                index.count_at_where(day, IssueRecord::is_open),
                index.stab(day).iter().filter(|iv| iv.record.is_open()).count()
            );
        }
        assert_eq!(index.effective_max_end(), index.max_end() - 1);
    }
}
