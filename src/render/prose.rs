//! Prose clean-up and formatting for non-code, non-table text.

use regex::Regex;
use std::sync::OnceLock;

use tutor_render_config::RendererConfig;

use super::inline::format_inline;
use super::regexes::{re_heading, re_horizontal_rule};

fn re_blank_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\n{3,}").expect("re_blank_run: pattern is valid and should always compile")
    })
}

/// Drop a leading `#` run that is glued to the text after it (`#Title`).
fn strip_bare_heading_marker(line: &str) -> &str {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return line;
    }
    match line[hashes..].chars().next() {
        Some(c) if !c.is_whitespace() => &line[hashes..],
        _ => line,
    }
}

/// Remove horizontal rules and bare heading markers, collapse runs of
/// blank lines to one, and trim.
pub fn clean(text: &str) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(|line| {
            if re_horizontal_rule().is_match(line) {
                ""
            } else {
                strip_bare_heading_marker(line)
            }
        })
        .collect();
    let joined = lines.join("\n");
    re_blank_run()
        .replace_all(&joined, "\n\n")
        .trim()
        .to_string()
}

fn indent_width(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ' || b == b'\t').count()
}

/// Wrap runs of indented lines in a synthesized fence.
///
/// A run starts at a non-blank line indented at least `min_indent` and
/// continues over blank lines and lines indented at least as deep. Lines are
/// de-indented by the run's indent. Trailing blank lines stay outside the
/// fence. A `min_indent` of zero disables detection.
pub fn fence_indented_code(text: &str, min_indent: usize, language: &str) -> String {
    if min_indent == 0 {
        return text.to_string();
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let indent = indent_width(line);
        if line.trim().is_empty() || indent < min_indent {
            out.push(line.to_string());
            i += 1;
            continue;
        }

        let mut end = i;
        while end < lines.len()
            && (lines[end].trim().is_empty() || indent_width(lines[end]) >= indent)
        {
            end += 1;
        }
        let mut body_end = end;
        while body_end > i && lines[body_end - 1].trim().is_empty() {
            body_end -= 1;
        }

        crate::debug_log!(
            "PROSE",
            "indented code run of {} lines at indent {}",
            body_end - i,
            indent
        );
        out.push(format!("```{language}"));
        for l in &lines[i..body_end] {
            let cut = indent_width(l).min(indent);
            out.push(l[cut..].to_string());
        }
        out.push("```".to_string());
        for l in &lines[body_end..end] {
            out.push(l.to_string());
        }
        i = end;
    }
    out.join("\n")
}

/// A piece of prose split around language-indicator code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProsePiece {
    Text(String),
    Code(String),
}

/// Split out unfenced code introduced by a line holding only `indicator`
/// (e.g. `python`). The code runs to the next blank line.
pub fn split_language_indicator(text: &str, indicator: &str) -> Vec<ProsePiece> {
    let lines: Vec<&str> = text.lines().collect();
    let mut pieces = Vec::new();
    let mut pending: Vec<&str> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let has_body = lines.get(i + 1).is_some_and(|l| !l.trim().is_empty());
        if lines[i].trim() == indicator && has_body {
            let mut end = i + 1;
            while end < lines.len() && !lines[end].trim().is_empty() {
                end += 1;
            }
            if !pending.is_empty() {
                pieces.push(ProsePiece::Text(pending.join("\n")));
                pending.clear();
            }
            pieces.push(ProsePiece::Code(lines[i + 1..end].join("\n").trim().to_string()));
            i = end;
            continue;
        }
        pending.push(lines[i]);
        i += 1;
    }
    if !pending.is_empty() {
        pieces.push(ProsePiece::Text(pending.join("\n")));
    }
    pieces
}

/// Heading levels 3 and deeper move one level down, capped at 6.
pub fn shifted_heading_level(hashes: usize) -> usize {
    if hashes >= 3 {
        (hashes + 1).min(6)
    } else {
        hashes
    }
}

/// Format cleaned prose line by line: headings and inline spans.
///
/// With `identifiers`, plain text outside spans is also run through the
/// identifier heuristic. Newlines are kept.
pub fn format_prose(text: &str, config: &RendererConfig, identifiers: bool) -> String {
    let wrap = identifiers.then_some(config);
    text.split('\n')
        .map(|line| match re_heading().captures(line) {
            Some(caps) => {
                let hashes = caps.get(1).map_or(1, |m| m.as_str().len());
                let content = caps.get(2).map_or("", |m| m.as_str());
                let level = shifted_heading_level(hashes);
                format!("<h{level}>{}</h{level}>", format_inline(content, None))
            }
            None => format_inline(line, wrap),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
