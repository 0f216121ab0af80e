//! Single-pass row/cell extraction from pipe-delimited lines.
//!
//! The walk keeps the current row, and a flag for being inside a code
//! fence nested in a cell. Lines inside such a fence, and non-empty lines
//! without a pipe, are appended to the last cell of the current row.

use std::ops::Range;

use crate::render::inline::re_inline_code;
use crate::render::regexes::re_pipe_separator;
use crate::render::types::TableData;

#[derive(Default)]
struct RowWalker {
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
    current: Option<Vec<String>>,
    in_fence: bool,
}

impl RowWalker {
    fn flush(&mut self) {
        if let Some(row) = self.current.take()
            && !row.is_empty()
        {
            self.rows.push(row);
        }
    }

    fn start_row(&mut self, cells: Vec<String>) {
        self.flush();
        self.current = Some(cells);
    }

    /// Append `text` to the last cell, joined with a newline.
    fn continue_cell(&mut self, text: &str) {
        match self.current.as_mut().and_then(|row| row.last_mut()) {
            Some(cell) => {
                cell.push('\n');
                cell.push_str(text);
            }
            None => self.start_row(vec![text.to_string()]),
        }
    }

    /// Append `text` to the last cell on the same line.
    fn extend_cell(&mut self, text: &str) {
        match self.current.as_mut().and_then(|row| row.last_mut()) {
            Some(cell) => cell.push_str(text),
            None => self.start_row(vec![text.to_string()]),
        }
    }

    fn take_header(&mut self) {
        self.flush();
        if let Some(header) = self.rows.pop() {
            self.header = Some(header);
        }
    }

    fn line(&mut self, line: &str) {
        if self.in_fence {
            self.fenced_line(line);
            return;
        }
        if line.trim().is_empty() {
            return;
        }
        if re_pipe_separator().is_match(line) {
            if self.header.is_none() {
                self.take_header();
            }
            return;
        }

        let odd_fences = line.matches("```").count() % 2 == 1;
        if line.contains('|') {
            self.start_row(split_cells(line));
        } else {
            self.continue_cell(line.trim());
        }
        if odd_fences {
            self.in_fence = true;
        }
    }

    fn fenced_line(&mut self, line: &str) {
        let Some(idx) = line.find("```") else {
            self.continue_cell(line);
            return;
        };
        let close = idx + 3;
        self.continue_cell(line[..close].trim_start());
        self.in_fence = false;

        let rest = &line[close..];
        if rest.contains('|') {
            let cells = split_cells(rest);
            if let Some(row) = self.current.as_mut() {
                row.extend(cells);
            }
        } else if !rest.trim().is_empty() {
            self.extend_cell(rest.trim_end());
        }
    }

    fn finish(mut self) -> Option<TableData> {
        self.flush();
        let mut rows = self.rows.into_iter();
        let header_row = match self.header {
            Some(header) => header,
            None => rows.next()?,
        };
        Some(TableData {
            header_row,
            body_rows: rows.collect(),
        })
    }
}

/// Extract header and body rows. `None` when the text holds no rows.
///
/// Without any separator line the first row becomes the header.
pub fn extract_rows(normalized: &str) -> Option<TableData> {
    let mut walker = RowWalker::default();
    for line in normalized.lines() {
        walker.line(line);
    }
    walker.finish()
}

fn protected_ranges(line: &str) -> Vec<Range<usize>> {
    re_inline_code().find_iter(line).map(|m| m.range()).collect()
}

/// Split a row on `|`, ignoring pipes inside inline code spans and escaped
/// `\|`. Empty padding cells from a leading or trailing `|` are dropped.
pub fn split_cells(line: &str) -> Vec<String> {
    let protected = protected_ranges(line);
    let is_protected = |pos: usize| protected.iter().any(|r| r.contains(&pos));

    let mut cells = Vec::new();
    let mut cell_start = 0;
    let mut prev = '\0';
    for (pos, ch) in line.char_indices() {
        if ch == '|' && prev != '\\' && !is_protected(pos) {
            cells.push(line[cell_start..pos].replace("\\|", "|").trim().to_string());
            cell_start = pos + 1;
        }
        prev = ch;
    }
    cells.push(line[cell_start..].replace("\\|", "|").trim().to_string());

    let trimmed = line.trim();
    if trimmed.ends_with('|') && cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    if trimmed.starts_with('|') && cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    cells
}
