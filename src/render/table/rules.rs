//! Built-in table detection rules.
//!
//! Rules are evaluated in the order they are listed here; the first enabled
//! rule whose pattern matches decides how the span is normalized. More
//! row-shaped patterns come before generic ones.

use regex::Regex;

/// How a matched region is turned into pipe-delimited rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Already pipe-delimited.
    Passthrough,
    /// Columns separated by tab characters.
    Tabs,
    /// Columns aligned with runs of two or more spaces.
    SpaceAligned,
    /// Tabs if the header has any, otherwise space alignment.
    Infer,
}

/// One named detection rule: a single predicate and a single normalization.
#[derive(Debug, Clone)]
pub struct TableRule {
    /// Unique ID, used by `rule_overrides` in the config.
    pub id: String,
    /// Multi-line pattern; a match starts at a line start.
    pub pattern: Regex,
    pub normalization: Normalization,
    pub description: String,
    pub enabled: bool,
}

impl TableRule {
    pub fn new(
        id: &str,
        pattern: &str,
        normalization: Normalization,
        description: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            id: id.to_string(),
            pattern: Regex::new(pattern)?,
            normalization,
            description: description.to_string(),
            enabled: true,
        })
    }
}

/// Column names that mark the model's reference tables.
const DOMAIN_HEADER_TOKENS: &[&str] = &[
    "Symbol/Function",
    "What it is",
    "Signature",
    "Returns",
    "Level",
    "Category",
    "Associativity",
    "Operators",
    "Notes",
];

fn domain_header_pattern() -> String {
    let tokens = DOMAIN_HEADER_TOKENS
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    // Two tokens on the header line, then a dash run before the next blank line.
    format!(
        r"(?m)^[^\n]*(?:{tokens})[^\n]*(?:{tokens})[^\n]*\n(?:[^\n]*\S[^\n]*\n)*?[ \t]*-{{3,}}[-\t ]*$"
    )
}

/// The built-in rules in priority order.
pub fn builtin_rules() -> Vec<TableRule> {
    let specs: Vec<(&str, String, Normalization, &str)> = vec![
        (
            "pipe_table",
            r"(?m)^[^\n]*\|[^\n]*\n[ \t]*[-:=| \t]*[-=][-:=| \t]*\n[^\n]*\|".to_string(),
            Normalization::Passthrough,
            "Pipe-delimited header, separator row, and at least one pipe row",
        ),
        (
            "tab_table",
            r"(?m)^[^\n\t]*\S[^\n\t]*\t[^\n]*\n[ \t]*[-=][-=\t ]*\n[^\n]*\t".to_string(),
            Normalization::Tabs,
            "Tab-delimited header, dash separator, and at least one tab row",
        ),
        (
            "space_aligned_table",
            r"(?m)^[^\n]*\S[ \t]{2,}\S[^\n]*\S[ \t]{2,}\S[^\n]*\n[ \t]*-+[ \t]{2,}-+[ \t]{2,}-+[- \t]*\n[ \t]*\S"
                .to_string(),
            Normalization::SpaceAligned,
            "Three or more space-aligned columns over a dash/space separator",
        ),
        (
            "domain_header_table",
            domain_header_pattern(),
            Normalization::Infer,
            "Reference-table column names followed by a dash separator",
        ),
        (
            "doc_style_table",
            r"(?m)^[ \t]*\S[^\n]*\S[ \t]{2,}\S[^\n]*\n[ \t]*-{2,}[- \t]*\n[ \t]*\S".to_string(),
            Normalization::SpaceAligned,
            "Header with wide gaps directly over a line of dashes",
        ),
        (
            "dash_separator_table",
            r"(?m)^[^\n]*\S[^\n]*\n[ \t]*-{3,}(?:[ \t]+-+)+[ \t]*\n[ \t]*\S".to_string(),
            Normalization::Infer,
            "Any header over whitespace-separated dash runs",
        ),
    ];

    specs
        .into_iter()
        .filter_map(|(id, pattern, normalization, description)| {
            match TableRule::new(id, &pattern, normalization, description) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    crate::debug_error!("TABLE", "built-in rule {} failed to compile: {}", id, e);
                    None
                }
            }
        })
        .collect()
}
