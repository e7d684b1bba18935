//! Presentation models built from ranked file matches.
//!
//! Two outputs leave the pipeline: a per-repository file tree listing every
//! matched file once, and a code view of the single top-ranked file with
//! its matching lines highlighted.

use crate::aggregate::FileMatch;
use serde::Serialize;
use std::collections::HashSet;

/// Highlight width of a marker, in columns.
pub const MARKER_END_COL: u32 = 1000;

/// One repository node of the result tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoGroup {
    pub name: String,
    pub files: Vec<FileMatch>,
}

/// Group ranked matches by repository label.
///
/// Groups appear in the order their first file appears. Within a group,
/// files with an already-seen display name are dropped, keeping the first
/// (highest-ranked) one.
pub fn build_tree(files: &[FileMatch]) -> Vec<RepoGroup> {
    let mut groups: Vec<RepoGroup> = Vec::new();
    let mut seen: Vec<HashSet<&str>> = Vec::new();

    for file in files {
        let idx = match groups.iter().position(|g| g.name == file.repo) {
            Some(idx) => idx,
            None => {
                groups.push(RepoGroup {
                    name: file.repo.clone(),
                    files: Vec::new(),
                });
                seen.push(HashSet::new());
                groups.len() - 1
            }
        };
        if seen[idx].insert(file.name.as_str()) {
            groups[idx].files.push(file.clone());
        }
    }
    groups
}

/// Zero-based row range highlighted in the code view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineMarker {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl LineMarker {
    /// Marker covering the whole of a one-based line.
    pub fn for_line(line: u32) -> Self {
        let row = line.saturating_sub(1);
        Self {
            start_row: row,
            start_col: 0,
            end_row: row,
            end_col: MARKER_END_COL,
        }
    }
}

/// Read-only view of one file with highlighted lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileView {
    pub path: String,
    pub name: String,
    pub content: String,
    pub lines: Vec<u32>,
    pub markers: Vec<LineMarker>,
    /// Line the view scrolls to: the last highlighted line
    pub focus_line: Option<u32>,
}

impl FileView {
    pub fn new(file: &FileMatch, content: String) -> Self {
        Self {
            path: file.path.clone(),
            name: file.name.clone(),
            content,
            lines: file.lines.clone(),
            markers: file.lines.iter().copied().map(LineMarker::for_line).collect(),
            focus_line: file.lines.last().copied(),
        }
    }

    pub fn is_highlighted(&self, line: u32) -> bool {
        self.lines.binary_search(&line).is_ok()
    }
}
