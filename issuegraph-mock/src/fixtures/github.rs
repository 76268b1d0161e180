/// As-of instant that pairs with [`github_sample_json`]; RFC 3339.
pub const GITHUB_SAMPLE_AS_OF: &str = "2021-06-10T00:00:00Z";

/// Five issues in the shape returned by `GET /repos/{owner}/{repo}/issues?state=all`.
///
/// Days relative to the epoch (2021-06-01T10:15:00Z), with the paired as-of:
/// - #1 open `[0, 8)` (bug)
/// - #2 closed `[1, 3)` (bug)
/// - #3 closed the same day, widened to `[2, 3)`
/// - #4 open `[4, 8)`
/// - #5 reopened: state open with a stale `closed_at`, so `[5, 8)`
#[must_use]
pub const fn github_sample_json() -> &'static str {
    r#"[
  {
    "number": 1,
    "title": "Crash when config file is empty",
    "state": "open",
    "locked": false,
    "labels": [{"name": "bug"}],
    "kind": "bug",
    "created_at": "2021-06-01T10:15:00Z",
    "closed_at": null
  },
  {
    "number": 2,
    "title": "Typo in README",
    "state": "closed",
    "locked": false,
    "labels": [],
    "kind": "bug",
    "created_at": "2021-06-02T11:00:00Z",
    "closed_at": "2021-06-04T16:20:00Z"
  },
  {
    "number": 3,
    "title": "Duplicate of #2",
    "state": "closed",
    "locked": true,
    "labels": [],
    "kind": "duplicate",
    "created_at": "2021-06-03T12:00:00Z",
    "closed_at": "2021-06-03T12:05:00Z"
  },
  {
    "number": 4,
    "title": "Support TOML output",
    "state": "open",
    "locked": false,
    "labels": [{"name": "enhancement"}],
    "kind": "feature",
    "created_at": "2021-06-05T10:15:00Z",
    "closed_at": null
  },
  {
    "number": 5,
    "title": "Flaky test on Windows",
    "state": "open",
    "locked": false,
    "labels": [],
    "kind": "bug",
    "created_at": "2021-06-06T11:00:00Z",
    "closed_at": "2021-06-07T09:00:00Z"
  }
]"#
}
