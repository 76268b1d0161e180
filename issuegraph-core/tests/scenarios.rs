use chrono::{DateTime, TimeZone, Utc};
use issuegraph_core::{
    BoundaryCache, IntervalIndex, IssueRecord, IssueStatus, IssuegraphError, NoProgress,
    StatusTimeline, aggregate,
};
use issuegraph_mock::scenario;

fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, 11, 9, 0, 0).unwrap()
}

fn titles(hits: &[&issuegraph_core::Interval<'_>]) -> Vec<String> {
    hits.iter()
        .map(|iv| iv.record.attributes["title"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn three_issues_normalize_and_stab() -> Result<(), IssuegraphError> {
    let records = scenario("three-issues").unwrap();
    let index = IntervalIndex::build(&records, as_of())?;

    let iv = index.intervals();
    assert_eq!((iv[0].begin, iv[0].end, iv[0].widened), (0, 5, false));
    assert_eq!((iv[1].begin, iv[1].end, iv[1].widened), (2, 10, false));
    assert_eq!((iv[2].begin, iv[2].end, iv[2].widened), (0, 1, true));

    assert_eq!(titles(&index.stab(0)), vec!["A", "C"]);
    assert_eq!(titles(&index.stab(3)), vec!["A", "B"]);
    assert_eq!(titles(&index.stab(5)), vec!["B"]);
    assert!(index.stab(10).is_empty());
    assert!(index.stab(-1).is_empty());
    Ok(())
}

#[test]
fn same_day_issue_yields_single_closed_day() -> Result<(), IssuegraphError> {
    let records = scenario("same-day").unwrap();
    let index = IntervalIndex::build(&records, as_of())?;

    let only = &index.intervals()[0];
    assert_eq!((only.begin, only.end), (0, 1));
    assert!(only.widened);

    let closed = aggregate(
        &index,
        |r: &IssueRecord| r.status == IssueStatus::Closed,
        None,
    );
    assert_eq!(closed.iter().collect::<Vec<_>>(), vec![(0, 1)]);
    Ok(())
}

#[test]
fn empty_records_fail_before_build() {
    let records: Vec<IssueRecord> = Vec::new();
    assert_eq!(
        IntervalIndex::build(&records, as_of()).unwrap_err(),
        IssuegraphError::EmptyInput
    );
}

#[test]
fn staggered_counts_rise_then_fall() -> Result<(), IssuegraphError> {
    let records = scenario("staggered").unwrap();
    let index = IntervalIndex::build(&records, as_of())?;
    let timeline = StatusTimeline::compute(&index, true, &mut NoProgress);

    assert_eq!(index.day_range(), (0, 15));
    assert!(timeline.open.counts().iter().all(|&c| c == 0));
    let expected: Vec<usize> = vec![1, 2, 3, 4, 5, 6, 7, 7, 7, 7, 6, 5, 4, 3, 2, 1];
    assert_eq!(timeline.closed.counts(), expected.as_slice());

    let bugs = aggregate(&index, |r: &IssueRecord| r.attributes["label"] == "bug", None);
    assert_eq!(bugs.get(0), Some(1));
    assert_eq!(bugs.get(7), Some(3));
    assert_eq!(bugs.get(8), Some(4));
    assert_eq!(bugs.peak(), 4);
    Ok(())
}

#[test]
fn all_open_runs_to_as_of() -> Result<(), IssuegraphError> {
    let records = scenario("all-open").unwrap();
    let index = IntervalIndex::build(&records, as_of())?;
    assert_eq!(index.max_end(), 10);
    assert_eq!(index.effective_max_end(), 9);

    let seed = BoundaryCache::for_predicate(&index, IssueRecord::is_open);
    assert_eq!(seed.get(0), Some(1));
    assert_eq!(seed.get(9), Some(3));
    let open = aggregate(&index, IssueRecord::is_open, Some(&seed));
    assert_eq!(open.counts(), &[1, 2, 3, 3, 3, 3, 3, 3, 3, 3]);
    Ok(())
}

#[test]
fn as_of_before_creation_is_malformed() {
    let records = scenario("all-open").unwrap();
    let err = IntervalIndex::build(&records, Utc.with_ymd_and_hms(2022, 12, 1, 0, 0, 0).unwrap())
        .unwrap_err();
    assert!(matches!(err, IssuegraphError::MalformedInput { index: 0, .. }));
}

#[test]
fn open_issue_created_on_as_of_day_is_widened() -> Result<(), IssuegraphError> {
    let records = [IssueRecord::open("2023-01-11T08:00:00Z")];
    let index = IntervalIndex::build(&records, as_of())?;

    let only = &index.intervals()[0];
    assert_eq!((only.begin, only.end), (0, 1));
    assert!(only.widened);
    assert_eq!(index.day_range(), (0, 0));

    let open = aggregate(&index, IssueRecord::is_open, None);
    assert_eq!(open.iter().collect::<Vec<_>>(), vec![(0, 1)]);

    let seeded = BoundaryCache::for_predicate(&index, IssueRecord::is_open);
    assert_eq!(aggregate(&index, IssueRecord::is_open, Some(&seeded)), open);
    Ok(())
}
