use crate::aggregate::FileMatch;
use crate::console::{SearchOutcome, Timings};
use crate::view::{FileView, RepoGroup};
use chrono::Utc;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::fmt::Write as _;

const SCHEMA_VERSION: &str = "1.0.0";

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Pretty,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            OutputFormat::Human => "human",
            OutputFormat::Json => "json",
            OutputFormat::Pretty => "pretty",
        };
        write!(f, "{}", value)
    }
}

#[derive(Serialize)]
pub struct JsonResponse<T> {
    pub schema_version: &'static str,
    pub execution_id: String,
    pub tool: &'static str,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<Timings>,
    pub data: T,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub error: String,
    pub message: String,
    pub remediation: Option<String>,
}

/// Result of the `query` command: what would be sent to the backend.
#[derive(Serialize)]
pub struct QueryPreview {
    pub query: String,
    pub corrected: String,
    pub index: String,
    pub size: usize,
    pub body: Value,
}

/// Result of the `aggregate` command over saved hits.
#[derive(Serialize)]
pub struct AggregateResponse {
    pub query: String,
    pub corrected: String,
    pub total_hits: u64,
    pub files: Vec<FileMatch>,
    pub tree: Vec<RepoGroup>,
}

pub fn json_response<T>(data: T) -> JsonResponse<T> {
    json_response_with_performance(data, None)
}

pub fn json_response_with_performance<T>(data: T, performance: Option<Timings>) -> JsonResponse<T> {
    JsonResponse {
        schema_version: SCHEMA_VERSION,
        execution_id: execution_id(),
        tool: "symscout",
        timestamp: Utc::now().to_rfc3339(),
        performance,
        data,
    }
}

pub fn execution_id() -> String {
    let timestamp = Utc::now().timestamp();
    let pid = std::process::id();
    format!("{:x}-{:x}", timestamp, pid)
}

fn join_lines(lines: &[u32]) -> String {
    lines
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Human-readable repository tree.
pub fn format_tree(tree: &[RepoGroup]) -> String {
    let mut out = String::new();
    for group in tree {
        let _ = writeln!(out, "{}/", group.name);
        for file in &group.files {
            let _ = writeln!(out, "  {}  lines={}", file.name, join_lines(&file.lines));
        }
    }
    out
}

/// Human-readable code view: a line-number gutter with `>` on
/// highlighted lines.
pub fn format_view(view: &FileView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- {} ---", view.path);
    let width = view.content.lines().count().max(1).to_string().len();
    for (idx, text) in view.content.lines().enumerate() {
        let line = idx as u32 + 1;
        let mark = if view.is_highlighted(line) { '>' } else { ' ' };
        let _ = writeln!(out, "{}{:>width$} | {}", mark, line, text, width = width);
    }
    out
}

/// Human-readable rendering of a full search.
pub fn format_outcome(outcome: &SearchOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", crate::output_common::format_total_header(outcome.files.len() as u64));
    out.push_str(&format_tree(&outcome.tree));
    if let Some(view) = &outcome.view {
        out.push('\n');
        out.push_str(&format_view(view));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate_hits;
    use crate::backend::{HitSource, RawHit, Token};
    use crate::view::build_tree;

    fn sample_files() -> Vec<FileMatch> {
        let hits = vec![RawHit {
            id: "1".to_string(),
            score: None,
            source: HitSource {
                file: "repo1/module/Foo.java".to_string(),
                tokens: vec![Token {
                    import_name: "Foo".to_string(),
                    line_numbers: vec![2, 3],
                }],
                file_content: None,
            },
        }];
        aggregate_hits("*Foo", &hits)
    }

    #[test]
    fn test_format_tree() {
        let tree = build_tree(&sample_files());
        assert_eq!(format_tree(&tree), "repo1-module/\n  Foo.java  lines=2,3\n");
    }

    #[test]
    fn test_format_view_marks_highlighted_lines() {
        let files = sample_files();
        let view = FileView::new(&files[0], "a\nb\nc\nd".to_string());
        let rendered = format_view(&view);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "--- repo1/module/Foo.java ---");
        assert_eq!(lines[1], " 1 | a");
        assert_eq!(lines[2], ">2 | b");
        assert_eq!(lines[3], ">3 | c");
        assert_eq!(lines[4], " 4 | d");
    }

    #[test]
    fn test_json_envelope() {
        let response = json_response(serde_json::json!({ "ok": true }));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["tool"], "symscout");
        assert_eq!(value["schema_version"], SCHEMA_VERSION);
        assert!(value.get("performance").is_none());
        assert_eq!(value["data"]["ok"], true);
    }
}
