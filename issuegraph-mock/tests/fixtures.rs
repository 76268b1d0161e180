use issuegraph_mock::{SCENARIOS, SyntheticSpec, github_sample_json, scenario, synthetic};
use issuegraph_types::{IssueRecord, IssueStatus};

#[test]
fn every_listed_scenario_resolves() {
    for name in SCENARIOS {
        let records = scenario(name).unwrap_or_else(|| panic!("missing scenario {name}"));
        assert!(!records.is_empty());
    }
    assert!(scenario("nope").is_none());
}

#[test]
fn closed_fixtures_carry_closed_at() {
    for name in SCENARIOS {
        for r in scenario(name).unwrap() {
            assert_eq!(r.closed_at.is_some(), r.status == IssueStatus::Closed);
        }
    }
}

#[test]
fn synthetic_is_deterministic_per_seed() {
    let spec = SyntheticSpec {
        issues: 50,
        ..SyntheticSpec::default()
    };
    assert_eq!(synthetic(spec), synthetic(spec));
    assert_ne!(synthetic(spec), synthetic(SyntheticSpec { seed: 8, ..spec }));
    assert_eq!(synthetic(spec).len(), 50);
}

#[test]
fn synthetic_respects_open_percent_extremes() {
    let all_open = synthetic(SyntheticSpec {
        issues: 20,
        open_percent: 100,
        ..SyntheticSpec::default()
    });
    assert!(all_open.iter().all(IssueRecord::is_open));
    let none_open = synthetic(SyntheticSpec {
        issues: 20,
        open_percent: 0,
        ..SyntheticSpec::default()
    });
    assert!(none_open.iter().all(|r| !r.is_open()));
}

#[test]
fn github_sample_is_a_json_array() {
    let text = github_sample_json();
    assert!(text.trim_start().starts_with('['));
    assert!(text.contains("\"state\": \"closed\""));
}
