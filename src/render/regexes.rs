//! Compiled regular expressions shared across the renderer.
//!
//! Each accessor uses a `OnceLock` to compile the pattern at most once.
//! Table detection patterns live with their rules in `table::rules`.

use regex::Regex;
use std::sync::OnceLock;

/// A code fence delimiter line: three backticks and an optional language tag.
pub(crate) fn re_fence_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[ \t]*```[ \t]*([\w+#.-]*)[ \t]*\r?$")
            .expect("re_fence_line: pattern is valid and should always compile")
    })
}

pub(crate) fn re_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(#{1,6})\s+(.+)$")
            .expect("re_heading: pattern is valid and should always compile")
    })
}

/// A horizontal rule line made of three or more dashes and nothing else.
pub(crate) fn re_horizontal_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^---+\r?$")
            .expect("re_horizontal_rule: pattern is valid and should always compile")
    })
}

/// Probable identifiers: calls, dotted names, indexing, bare tokens.
///
/// Alternation order matters: the call/dotted/indexed forms must win over the
/// bare token so `len()` is wrapped as one span. Forms ending in `)` or `]`
/// carry no trailing word boundary.
pub(crate) fn re_identifier() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(?:[A-Za-z0-9_]+\(\)|\w+\[\w+\]|\w+\.\w+\b|[A-Za-z0-9_]+\b)")
            .expect("re_identifier: pattern is valid and should always compile")
    })
}

/// A line built only of pipes, dashes, colons, equals signs and whitespace,
/// with at least one dash or equals sign.
pub(crate) fn re_pipe_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[\s|:=-]*[=-][\s|:=-]*$")
            .expect("re_pipe_separator: pattern is valid and should always compile")
    })
}

/// A dash/equals separator line of a table without pipes.
pub(crate) fn re_plain_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[\s=-]*[=-][\s=-]*$")
            .expect("re_plain_separator: pattern is valid and should always compile")
    })
}

/// Column gap in space-aligned tables.
pub(crate) fn re_column_gap() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[ \t]{2,}")
            .expect("re_column_gap: pattern is valid and should always compile")
    })
}

/// Function-signature rows such as `math.sqrt(x)  → float  Square root`.
pub(crate) fn re_arrow_row() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([A-Za-z0-9_.]+\([^)]*\))\s+→\s+(\S+)(?:\s+(.*?))?\s*$")
            .expect("re_arrow_row: pattern is valid and should always compile")
    })
}
