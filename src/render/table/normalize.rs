//! Rewriting tab- and space-delimited tables into pipe-delimited rows.
//!
//! The header is the line directly above the first dash/equals separator.
//! Column boundaries come from tabs, from the header's wide gaps (or the
//! separator's dash runs when those name more columns), or, for
//! function-signature rows, from the `name(args) → type` shape.

use super::rules::Normalization;
use crate::render::regexes::{re_arrow_row, re_column_gap, re_plain_separator};

/// Normalize `region` to pipe-delimited lines.
///
/// Lines that already contain `|` and lines inside a nested fence pass
/// through unchanged. The header/body divider is re-emitted as `N` `---`
/// cells; other dash-only or blank lines are dropped.
pub fn normalize(region: &str, normalization: Normalization) -> String {
    if normalization == Normalization::Passthrough {
        return region.to_string();
    }

    let lines: Vec<&str> = region.lines().collect();
    let separator_idx = (1..lines.len()).find(|&i| {
        re_plain_separator().is_match(lines[i]) && !lines[i - 1].trim().is_empty()
    });
    let header_idx = match separator_idx {
        Some(i) => i - 1,
        None => lines.iter().position(|l| !l.trim().is_empty()).unwrap_or(0),
    };
    let Some(header) = lines.get(header_idx) else {
        return String::new();
    };

    let mode = match normalization {
        Normalization::Infer if header.contains('\t') => Normalization::Tabs,
        Normalization::Infer => Normalization::SpaceAligned,
        other => other,
    };
    let separator = separator_idx.map(|i| lines[i]);
    let layout = ColumnLayout::from_header(header, separator, mode);
    crate::debug_log!(
        "TABLE",
        "normalizing {} lines as {:?}, {} columns",
        lines.len(),
        mode,
        layout.count
    );

    let mut out = Vec::with_capacity(lines.len());
    let mut in_fence = false;
    for (i, line) in lines.iter().enumerate() {
        let fence_marks = line.matches("```").count();
        if in_fence || fence_marks > 0 {
            out.push(line.to_string());
            if fence_marks % 2 == 1 {
                in_fence = !in_fence;
            }
            continue;
        }
        if Some(i) == separator_idx {
            out.push(separator_row(layout.count));
            continue;
        }
        if line.trim().is_empty() || re_plain_separator().is_match(line) {
            continue;
        }
        if line.contains('|') {
            out.push(line.to_string());
            continue;
        }
        out.push(pipe_row(&layout.split(line)));
    }
    out.join("\n")
}

fn separator_row(count: usize) -> String {
    let cells = vec!["---"; count.max(1)];
    format!("| {} |", cells.join(" | "))
}

fn pipe_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

/// Column boundaries inferred from the header line.
struct ColumnLayout {
    mode: Normalization,
    /// Char offsets where each header column begins (space mode only).
    starts: Vec<usize>,
    count: usize,
}

impl ColumnLayout {
    fn from_header(header: &str, separator: Option<&str>, mode: Normalization) -> Self {
        match mode {
            Normalization::Tabs => Self {
                mode,
                starts: Vec::new(),
                count: trim_trailing_empty(split_tabs(header)).len(),
            },
            _ => {
                let mut starts = column_starts(header);
                if let Some(runs) = separator.map(run_starts)
                    && runs.len() > starts.len()
                {
                    starts = runs;
                }
                Self {
                    mode,
                    count: starts.len(),
                    starts,
                }
            }
        }
    }

    fn split(&self, line: &str) -> Vec<String> {
        if self.mode == Normalization::Tabs && line.contains('\t') {
            return fit_cells(split_tabs(line), self.count);
        }

        let parts = split_gaps(line);
        if parts.len() == self.count {
            return parts;
        }
        if let Some(caps) = re_arrow_row().captures(line) {
            return (1..=3)
                .map(|g| {
                    caps.get(g)
                        .map(|m| m.as_str().trim().to_string())
                        .unwrap_or_default()
                })
                .collect();
        }
        if self.starts.len() > 1 {
            return slice_columns(line, &self.starts);
        }
        parts
    }
}

fn split_tabs(line: &str) -> Vec<String> {
    line.split('\t').map(|c| c.trim().to_string()).collect()
}

fn trim_trailing_empty(mut cells: Vec<String>) -> Vec<String> {
    while cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

/// Pad a row to `count` cells. Empty cells past `count` are dropped, so an
/// empty trailing column stays a cell of its own.
fn fit_cells(mut cells: Vec<String>, count: usize) -> Vec<String> {
    while cells.len() > count && cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    if cells.len() < count {
        cells.resize(count, String::new());
    }
    cells
}

fn split_gaps(line: &str) -> Vec<String> {
    re_column_gap()
        .split(line.trim())
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

/// Char offsets of the first column and of every column after a 2+ space gap.
fn column_starts(header: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut gap = 0usize;
    let mut seen_text = false;
    for (i, ch) in header.chars().enumerate() {
        if ch.is_whitespace() {
            gap += 1;
            continue;
        }
        if !seen_text || gap >= 2 {
            starts.push(i);
        }
        seen_text = true;
        gap = 0;
    }
    starts
}

/// Char offsets of every whitespace-separated run, e.g. each `---` group.
fn run_starts(line: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut prev_ws = true;
    for (i, ch) in line.chars().enumerate() {
        if !ch.is_whitespace() && prev_ws {
            starts.push(i);
        }
        prev_ws = ch.is_whitespace();
    }
    starts
}

/// Cut `line` at the header's column offsets, pushing a cut forward when it
/// falls inside a word.
fn slice_columns(line: &str, starts: &[usize]) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    let mut cells = Vec::with_capacity(starts.len());
    let mut begin = 0usize;
    for &start in &starts[1..] {
        let mut cut = start.clamp(begin, chars.len());
        while cut > begin
            && cut < chars.len()
            && !chars[cut - 1].is_whitespace()
            && !chars[cut].is_whitespace()
        {
            cut += 1;
        }
        cells.push(chars[begin..cut].iter().collect::<String>().trim().to_string());
        begin = cut;
    }
    cells.push(chars[begin..].iter().collect::<String>().trim().to_string());
    cells
}
