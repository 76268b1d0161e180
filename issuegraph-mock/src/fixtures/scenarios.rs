use issuegraph_types::IssueRecord;

fn day(d: u32) -> String {
    format!("2023-01-{:02}T09:00:00Z", d + 1)
}

pub fn three_issues() -> Vec<IssueRecord> {
    vec![
        IssueRecord::closed(day(0), day(5)).with_attribute("title", "A"),
        IssueRecord::open(day(2)).with_attribute("title", "B"),
        IssueRecord::closed(day(0), "2023-01-01T17:30:00Z").with_attribute("title", "C"),
    ]
}

pub fn same_day() -> Vec<IssueRecord> {
    vec![IssueRecord::closed("2023-01-01T08:00:00Z", "2023-01-01T08:45:00Z")]
}

pub fn all_open() -> Vec<IssueRecord> {
    (0..3)
        .map(|d| IssueRecord::open(day(d)).with_attribute("number", d + 1))
        .collect()
}

pub fn staggered() -> Vec<IssueRecord> {
    (0..10)
        .map(|d| {
            IssueRecord::closed(day(d), day(d + 7))
                .with_attribute("number", d + 1)
                .with_attribute("label", if d % 2 == 0 { "bug" } else { "feature" })
        })
        .collect()
}
