//! Inline span extraction and formatting.
//!
//! Inline markup is found with a multi-pass parse over claimed spans:
//! code spans first (opaque), then bold, then italic. A later match is
//! rejected when it cuts through a claimed span. A match that fully encloses
//! claimed spans, such as bold around inline code, replaces them and its
//! inner text is formatted again. All patterns are non-greedy, so `**a** **b**` yields two
//! bold spans.

use regex::Regex;
use std::sync::OnceLock;

use tutor_render_config::{IdentifierHeuristic, RendererConfig};

use super::regexes::re_identifier;

// ---------------------------------------------------------------------------
// Compiled inline regexes
// ---------------------------------------------------------------------------

pub(crate) fn re_inline_code() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"`([^`]+?)`")
            .expect("re_inline_code: pattern is valid and should always compile")
    })
}

pub(crate) fn re_bold() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\*\*([^*]+?)\*\*")
            .expect("re_bold: pattern is valid and should always compile")
    })
}

pub(crate) fn re_italic() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\*([^*]+?)\*")
            .expect("re_italic: pattern is valid and should always compile")
    })
}

// ---------------------------------------------------------------------------
// Inline span types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    pub start: usize,
    pub end: usize,
    pub kind: SpanKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanKind {
    Code(String),
    Bold(String),
    Italic(String),
}

// ---------------------------------------------------------------------------
// Claimed-span helpers
// ---------------------------------------------------------------------------

/// True when `start..end` overlaps a claimed span without enclosing it.
fn cuts_through(claimed: &[InlineSpan], start: usize, end: usize) -> bool {
    claimed
        .iter()
        .any(|s| s.start < end && start < s.end && !(start <= s.start && s.end <= end))
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    let mut next = pos + 1;
    while next < text.len() && !text.is_char_boundary(next) {
        next += 1;
    }
    next
}

/// Matches of `re` that respect the claimed spans, with the text of capture 1.
fn find_unclaimed<'t>(
    text: &'t str,
    re: &Regex,
    claimed: &[InlineSpan],
) -> Vec<(usize, usize, &'t str)> {
    let mut results = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        let Some(caps) = re.captures_at(text, pos) else {
            break;
        };
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        if cuts_through(claimed, whole.start(), whole.end()) {
            pos = next_char_boundary(text, whole.start());
        } else {
            results.push((whole.start(), whole.end(), inner.as_str()));
            pos = whole.end();
        }
    }
    results
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extract inline code, bold and italic spans, sorted by start position.
pub fn extract_inline_spans(text: &str) -> Vec<InlineSpan> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut spans: Vec<InlineSpan> = Vec::new();

    let passes: [(&Regex, fn(String) -> SpanKind); 3] = [
        (re_inline_code(), SpanKind::Code),
        (re_bold(), SpanKind::Bold),
        (re_italic(), SpanKind::Italic),
    ];

    for (re, make) in passes {
        let found = find_unclaimed(text, re, &spans);
        for (start, end, inner) in found {
            spans.retain(|s| !(start <= s.start && s.end <= end));
            spans.push(InlineSpan {
                start,
                end,
                kind: make(inner.to_string()),
            });
        }
    }

    spans.sort_by_key(|s| s.start);
    spans
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn should_wrap(token: &str, config: &RendererConfig) -> bool {
    if config.is_stopword(token) {
        return false;
    }
    match config.identifier_heuristic {
        IdentifierHeuristic::Off => false,
        IdentifierHeuristic::Identifiers => token.contains(['(', '.', '[']),
        IdentifierHeuristic::AllTokens => true,
    }
}

/// Escape `run`, wrapping probable identifiers in `<code>`.
pub(crate) fn wrap_identifiers(run: &str, config: &RendererConfig) -> String {
    let mut out = String::with_capacity(run.len() + 16);
    let mut last = 0;
    for m in re_identifier().find_iter(run) {
        if !should_wrap(m.as_str(), config) {
            continue;
        }
        out.push_str(&escape_html(&run[last..m.start()]));
        out.push_str("<code>");
        out.push_str(&escape_html(m.as_str()));
        out.push_str("</code>");
        last = m.end();
    }
    out.push_str(&escape_html(&run[last..]));
    out
}

fn push_plain(out: &mut String, run: &str, identifiers: Option<&RendererConfig>) {
    match identifiers {
        Some(config) => out.push_str(&wrap_identifiers(run, config)),
        None => out.push_str(&escape_html(run)),
    }
}

/// Render `text` to escaped HTML with `<code>`, `<strong>` and `<em>` spans.
///
/// When `identifiers` is given, text outside any span also goes through the
/// identifier heuristic.
pub fn format_inline(text: &str, identifiers: Option<&RendererConfig>) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut pos = 0;
    for span in extract_inline_spans(text) {
        push_plain(&mut out, &text[pos..span.start], identifiers);
        let (tag, body) = match &span.kind {
            SpanKind::Code(inner) => ("code", escape_html(inner)),
            SpanKind::Bold(inner) => ("strong", format_inline(inner, None)),
            SpanKind::Italic(inner) => ("em", format_inline(inner, None)),
        };
        out.push('<');
        out.push_str(tag);
        out.push('>');
        out.push_str(&body);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
        pos = span.end;
    }
    push_plain(&mut out, &text[pos..], identifiers);
    out
}
