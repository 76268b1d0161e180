//! Chart artifacts for the computed series.
//!
//! Each artifact is a small JSON document describing one line chart: a title,
//! axis labels and one or more `(day, count)` series. Any plotting front end
//! can render them.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use issuegraph_core::{DayCountMapping, DayOffset, IssuegraphError};
use serde::{Deserialize, Serialize};

use crate::core::GraphReport;

/// File name of the open-issues chart.
pub const OPEN_ARTIFACT: &str = "open_issues_per_day.json";
/// File name of the closed-issues chart.
pub const CLOSED_ARTIFACT: &str = "closed_issues_per_day.json";
/// File name of the combined open/closed chart.
pub const COMBINED_ARTIFACT: &str = "open_closed_issues_per_day.json";

/// One line of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesDocument {
    /// Legend label.
    pub label: String,
    /// Suggested line color, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// `(day, count)` pairs, ascending by day.
    pub points: Vec<(DayOffset, usize)>,
}

impl SeriesDocument {
    fn new(label: impl Into<String>, color: Option<&str>, counts: &DayCountMapping) -> Self {
        Self {
            label: label.into(),
            color: color.map(str::to_string),
            points: counts.iter().collect(),
        }
    }
}

/// A line chart: what the rendering side needs and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDocument {
    /// Chart title.
    pub title: String,
    /// X axis label.
    pub x_label: String,
    /// Y axis label.
    pub y_label: String,
    /// Wall-clock start of day 0, for labelling the X axis with dates.
    pub epoch: String,
    /// Lines to draw.
    pub series: Vec<SeriesDocument>,
}

impl ChartDocument {
    fn new(title: impl Into<String>, report: &GraphReport, series: Vec<SeriesDocument>) -> Self {
        Self {
            title: title.into(),
            x_label: "Day".to_string(),
            y_label: "Number of Issues".to_string(),
            epoch: report.epoch.format("%Y-%m-%dT%H:%M:%S").to_string(),
            series,
        }
    }
}

/// Writes chart documents for a [`GraphReport`] into a directory.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    dir: PathBuf,
}

impl ArtifactWriter {
    /// Writer targeting `dir`; the directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The charts for `report`, paired with their file names.
    ///
    /// Always the open, closed and combined charts, followed by one chart per
    /// filtered series. Filters whose names slug to the same file get a
    /// numeric suffix (`kind_bug_2_issues_per_day.json`), so no chart
    /// overwrites another.
    #[must_use]
    pub fn charts(report: &GraphReport) -> Vec<(String, ChartDocument)> {
        let t = &report.timeline;
        let mut out = vec![
            (
                OPEN_ARTIFACT.to_string(),
                ChartDocument::new(
                    "Number of Open Issues Per Day",
                    report,
                    vec![SeriesDocument::new("Open Issues", None, &t.open)],
                ),
            ),
            (
                CLOSED_ARTIFACT.to_string(),
                ChartDocument::new(
                    "Number of Closed Issues Per Day",
                    report,
                    vec![SeriesDocument::new("Closed Issues", None, &t.closed)],
                ),
            ),
            (
                COMBINED_ARTIFACT.to_string(),
                ChartDocument::new(
                    "Number of Issues Per Day",
                    report,
                    vec![
                        SeriesDocument::new("Open Issues", Some("blue"), &t.open),
                        SeriesDocument::new("Closed Issues", Some("red"), &t.closed),
                    ],
                ),
            ),
        ];
        let mut taken: HashSet<String> = out.iter().map(|(name, _)| name.clone()).collect();
        for fs in &report.filtered {
            let label = fs.filter.label();
            let stem = format!(
                "{}_{}",
                slug(&fs.filter.key),
                slug(&value_text(&fs.filter.value))
            );
            out.push((
                unique_name(&stem, &mut taken),
                ChartDocument::new(
                    format!("Number of \"{label}\" Issues Per Day"),
                    report,
                    vec![SeriesDocument::new(label, None, &fs.counts)],
                ),
            ));
        }
        out
    }

    /// Write every chart of `report` and return the written paths.
    ///
    /// # Errors
    /// Returns `Io` if the directory cannot be created, a file cannot be
    /// written, or a written file is missing afterwards.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "issuegraph::export::write_report", skip_all, fields(dir = %self.dir.display()))
    )]
    pub fn write_report(&self, report: &GraphReport) -> Result<Vec<PathBuf>, IssuegraphError> {
        fs::create_dir_all(&self.dir).map_err(|e| IssuegraphError::io(&self.dir, e))?;
        Self::charts(report)
            .into_iter()
            .map(|(name, chart)| self.write_chart(&name, &chart))
            .collect()
    }

    /// Write one chart document as `name` inside the output directory.
    ///
    /// # Errors
    /// Returns `Io` on any write failure or if the file is missing afterwards.
    pub fn write_chart(&self, name: &str, chart: &ChartDocument) -> Result<PathBuf, IssuegraphError> {
        let path = self.dir.join(name);
        let file = File::create(&path).map_err(|e| IssuegraphError::io(&path, e))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, chart).map_err(|e| IssuegraphError::io(&path, e))?;
        out.write_all(b"\n")
            .and_then(|()| out.flush())
            .map_err(|e| IssuegraphError::io(&path, e))?;

        if !path.is_file() {
            return Err(IssuegraphError::io(&path, "artifact missing after write"));
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.display(), "artifact written");
        Ok(path)
    }
}

fn value_text(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `<stem>_issues_per_day.json`, suffixed `_2`, `_3`, ... until unused.
fn unique_name(stem: &str, taken: &mut HashSet<String>) -> String {
    let mut name = format!("{stem}_issues_per_day.json");
    let mut n = 2;
    while !taken.insert(name.clone()) {
        name = format!("{stem}_{n}_issues_per_day.json");
        n += 1;
    }
    name
}

fn slug(s: &str) -> String {
    let out: String = s
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    if out.is_empty() { "_".to_string() } else { out }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_keeps_ascii_alphanumerics_only() {
        assert_eq!(slug("Kind"), "kind");
        assert_eq!(slug("good first issue"), "good_first_issue");
        assert_eq!(slug("ü"), "_");
        assert_eq!(slug(""), "_");
    }

    #[test]
    fn colliding_stems_get_numbered() {
        let mut taken = HashSet::new();
        assert_eq!(unique_name("kind_bug", &mut taken), "kind_bug_issues_per_day.json");
        assert_eq!(unique_name("kind_bug", &mut taken), "kind_bug_2_issues_per_day.json");
        assert_eq!(unique_name("kind_bug", &mut taken), "kind_bug_3_issues_per_day.json");
    }

    #[test]
    fn value_text_unquotes_strings() {
        assert_eq!(value_text(&serde_json::Value::from("bug")), "bug");
        assert_eq!(value_text(&serde_json::Value::Bool(true)), "true");
    }
}
