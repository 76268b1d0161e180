//! Reading issue dumps into records.
//!
//! The expected input is a JSON array of issue objects as returned by the
//! GitHub REST API (`GET /repos/{owner}/{repo}/issues?state=all`), possibly
//! concatenated across pages.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use issuegraph_core::{IssueRecord, IssuegraphError};

/// Parse records from a JSON string.
///
/// # Errors
/// Returns `Parse` if the text is not a JSON array of issue objects.
pub fn records_from_str(json: &str) -> Result<Vec<IssueRecord>, IssuegraphError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse records from any reader.
///
/// # Errors
/// Returns `Parse` if the stream is not a JSON array of issue objects.
pub fn records_from_reader<R: Read>(reader: R) -> Result<Vec<IssueRecord>, IssuegraphError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load records from a JSON file.
///
/// # Errors
/// - `Io` if the file cannot be opened (including when it does not exist).
/// - `Parse` if its contents are not a JSON array of issue objects.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "issuegraph::loader::load_records",
        skip_all,
        fields(path = %path.as_ref().display()),
    )
)]
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<IssueRecord>, IssuegraphError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IssuegraphError::io(path, e))?;
    let records = records_from_reader(BufReader::new(file)).map_err(|e| match e {
        IssuegraphError::Parse(msg) => IssuegraphError::Parse(format!("{}: {msg}", path.display())),
        other => other,
    })?;
    #[cfg(feature = "tracing")]
    tracing::debug!(records = records.len(), "issue records loaded");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_array_payloads() {
        assert!(matches!(
            records_from_str(r#"{"state": "open"}"#),
            Err(IssuegraphError::Parse(_))
        ));
        assert!(matches!(records_from_str("[{"), Err(IssuegraphError::Parse(_))));
    }

    #[test]
    fn missing_created_at_is_a_parse_error() {
        assert!(matches!(
            records_from_str(r#"[{"state": "open"}]"#),
            Err(IssuegraphError::Parse(_))
        ));
    }

    #[test]
    fn empty_array_loads_as_no_records() {
        assert!(records_from_str("[]").unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_io() {
        let err = load_records("/definitely/not/here/issues.json").unwrap_err();
        assert!(matches!(err, IssuegraphError::Io { .. }));
    }
}
