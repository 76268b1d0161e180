use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use issuegraph_core::{
    AttributeFilter, BoundaryCache, DayBoundary, DayCountMapping, GraphConfig, IntervalIndex,
    IssueRecord, IssuegraphError, NoProgress, ProgressObserver, StatusTimeline, Tz,
    aggregate_observed,
};

/// Owns a set of issue records and the settings to turn them into day series.
pub struct IssueGraph {
    pub(crate) records: Vec<IssueRecord>,
    pub(crate) cfg: GraphConfig,
    pub(crate) as_of: DateTime<Utc>,
    pub(crate) boundary: DayBoundary,
}

/// Builder for constructing an `IssueGraph` with custom configuration.
pub struct IssueGraphBuilder {
    records: Vec<IssueRecord>,
    cfg: GraphConfig,
}

impl Default for IssueGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IssueGraphBuilder {
    /// Create a new builder with defaults.
    ///
    /// - No records; supply them via [`records`](Self::records).
    /// - "Now" is sampled from the system clock at [`build`](Self::build) time
    ///   unless pinned with [`as_of`](Self::as_of).
    /// - Days follow each timestamp's own wall clock; boundary seeding is on.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            cfg: GraphConfig::default(),
        }
    }

    /// Replace the record set.
    #[must_use]
    pub fn records(mut self, records: Vec<IssueRecord>) -> Self {
        self.records = records;
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: GraphConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Pin the instant used as "now" for open issues.
    ///
    /// Pinning makes runs reproducible; otherwise the end of every open issue
    /// moves with the wall clock.
    #[must_use]
    pub const fn as_of(mut self, at: DateTime<Utc>) -> Self {
        self.cfg.as_of = Some(at);
        self
    }

    /// Count days in the given IANA timezone instead of each timestamp's wall clock.
    #[must_use]
    pub fn timezone(mut self, tz: impl Into<String>) -> Self {
        self.cfg.timezone = Some(tz.into());
        self
    }

    /// Toggle seeding each walk with its boundary-day counts.
    #[must_use]
    pub const fn seed_boundaries(mut self, yes: bool) -> Self {
        self.cfg.seed_boundaries = yes;
        self
    }

    /// Add a `key == value` series next to the open/closed pair.
    #[must_use]
    pub fn filter(mut self, filter: AttributeFilter) -> Self {
        self.cfg.filters.push(filter);
        self
    }

    /// Validate settings and build the `IssueGraph`.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an unknown timezone name or a filter with an
    /// empty attribute key. Record contents are validated later, when the
    /// index is built.
    pub fn build(self) -> Result<IssueGraph, IssuegraphError> {
        let boundary = match self.cfg.timezone.as_deref() {
            None => DayBoundary::Wall,
            Some(name) => DayBoundary::Zone(name.parse::<Tz>().map_err(|_| {
                IssuegraphError::InvalidArg(format!("unknown timezone '{name}'"))
            })?),
        };
        if let Some(f) = self.cfg.filters.iter().find(|f| f.key.trim().is_empty()) {
            return Err(IssuegraphError::InvalidArg(format!(
                "filter with empty attribute name: {f}"
            )));
        }
        let as_of = self.cfg.as_of.unwrap_or_else(Utc::now);

        Ok(IssueGraph {
            records: self.records,
            cfg: self.cfg,
            as_of,
            boundary,
        })
    }
}

/// A per-day series for one attribute filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredSeries {
    /// The predicate that was counted.
    pub filter: AttributeFilter,
    /// Matching issues per day.
    pub counts: DayCountMapping,
}

/// Everything computed for one run: the open/closed timeline plus any filtered series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphReport {
    /// Wall-clock start of day 0 (earliest creation).
    pub epoch: NaiveDateTime,
    /// Instant used as "now" for open issues.
    pub as_of: DateTime<Utc>,
    /// Number of issues indexed.
    pub issues: usize,
    /// Number of same-day intervals widened to one day.
    pub widened: usize,
    /// Open and closed issues per day.
    pub timeline: StatusTimeline,
    /// Extra `key == value` series, in configuration order.
    pub filtered: Vec<FilteredSeries>,
}

impl IssueGraph {
    /// Start building a new `IssueGraph`.
    ///
    /// ```rust,ignore
    /// use issuegraph::{IssueGraph, loader};
    ///
    /// let graph = IssueGraph::builder()
    ///     .records(loader::load_records("issues.json")?)
    ///     .timezone("Europe/Rome")
    ///     .build()?;
    /// let report = graph.compute()?;
    /// ```
    #[must_use]
    pub fn builder() -> IssueGraphBuilder {
        IssueGraphBuilder::new()
    }

    /// The records this graph was built with.
    #[must_use]
    pub fn records(&self) -> &[IssueRecord] {
        &self.records
    }

    /// The effective configuration.
    #[must_use]
    pub const fn config(&self) -> &GraphConfig {
        &self.cfg
    }

    /// Instant used as "now" for open issues.
    #[must_use]
    pub const fn as_of(&self) -> DateTime<Utc> {
        self.as_of
    }

    /// Build the interval index over the owned records.
    ///
    /// # Errors
    /// `EmptyInput` or `MalformedInput`, see [`IntervalIndex::build`].
    pub fn index(&self) -> Result<IntervalIndex<'_>, IssuegraphError> {
        self.index_observed(&mut NoProgress)
    }

    fn index_observed(
        &self,
        progress: &mut dyn ProgressObserver,
    ) -> Result<IntervalIndex<'_>, IssuegraphError> {
        let mut builder = IntervalIndex::builder(self.as_of).day_boundary(self.boundary);
        builder.extend(&self.records);
        builder.build_observed(progress)
    }

    /// Build the index and aggregate every configured series.
    ///
    /// # Errors
    /// Propagates index build errors; aggregation itself cannot fail.
    pub fn compute(&self) -> Result<GraphReport, IssuegraphError> {
        self.compute_observed(&mut NoProgress)
    }

    /// Like [`compute`](Self::compute), reporting progress of every loop.
    ///
    /// # Errors
    /// Propagates index build errors.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "issuegraph::compute",
            skip_all,
            fields(issues = self.records.len(), filters = self.cfg.filters.len()),
        )
    )]
    pub fn compute_observed(
        &self,
        progress: &mut dyn ProgressObserver,
    ) -> Result<GraphReport, IssuegraphError> {
        let index = self.index_observed(progress)?;
        let timeline = StatusTimeline::compute(&index, self.cfg.seed_boundaries, progress);

        let filtered = self
            .cfg
            .filters
            .iter()
            .map(|filter| {
                let predicate = |r: &IssueRecord| filter.matches(r);
                let seed = self
                    .cfg
                    .seed_boundaries
                    .then(|| BoundaryCache::for_predicate(&index, predicate));
                let counts =
                    aggregate_observed(&index, predicate, seed.as_ref(), &filter.label(), progress);
                FilteredSeries {
                    filter: filter.clone(),
                    counts,
                }
            })
            .collect();

        let report = GraphReport {
            epoch: index.epoch(),
            as_of: self.as_of,
            issues: index.len(),
            widened: index.intervals().iter().filter(|iv| iv.widened).count(),
            timeline,
            filtered,
        };
        #[cfg(feature = "tracing")]
        tracing::info!(
            issues = report.issues,
            widened = report.widened,
            days = report.timeline.open.len(),
            epoch = %report.epoch,
            "issue timeline computed"
        );
        Ok(report)
    }
}
