use chrono::{TimeZone, Utc};
use issuegraph_types::{AttributeFilter, GraphConfig, IssuegraphError};

#[test]
fn graph_config_roundtrip() {
    let cfg = GraphConfig {
        as_of: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
        timezone: Some("Europe/Rome".into()),
        seed_boundaries: false,
        filters: vec![AttributeFilter::new("locked", true)],
    };

    let json = serde_json::to_string(&cfg).expect("serialize graph config");
    let de: GraphConfig = serde_json::from_str(&json).expect("deserialize graph config");

    assert_eq!(de, cfg);
}

#[test]
fn graph_config_missing_fields_take_defaults() {
    let de: GraphConfig = serde_json::from_str(r#"{"timezone": "UTC"}"#).unwrap();
    assert_eq!(de.timezone.as_deref(), Some("UTC"));
    assert!(de.seed_boundaries);
    assert!(de.as_of.is_none());
    assert!(de.filters.is_empty());
}

#[test]
fn json_errors_map_to_parse() {
    let err: IssuegraphError = serde_json::from_str::<GraphConfig>("{")
        .unwrap_err()
        .into();
    assert!(matches!(err, IssuegraphError::Parse(_)));
    assert!(!err.is_build_error());
    assert!(IssuegraphError::EmptyInput.is_build_error());
}
