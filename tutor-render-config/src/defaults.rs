//! Default value functions for configuration.
//!
//! Each `default_*`-style free function is used as a
//! `#[serde(default = "crate::defaults::...")]` attribute on a config field.

// ── Primitive helpers ──────────────────────────────────────────────────────

pub fn bool_true() -> bool {
    true
}

// ── Renderer ───────────────────────────────────────────────────────────────

/// Language assumed for a fenced block with no tag (the tutor teaches Python).
pub fn default_language() -> String {
    "python".to_string()
}

/// Language assumed for a fenced block embedded in a table cell.
pub fn cell_code_language() -> String {
    "text".to_string()
}

pub fn indent_code_min() -> usize {
    4
}

pub fn indent_code_language() -> String {
    "python".to_string()
}

pub fn stopwords() -> Vec<String> {
    [
        "the", "and", "for", "with", "this", "that", "you", "your", "can", "will",
    ]
    .iter()
    .map(|w| w.to_string())
    .collect()
}

// ── Streaming ──────────────────────────────────────────────────────────────

pub fn stream_chunk_size() -> usize {
    5
}

pub fn stream_delay_ms() -> u64 {
    50
}

// ── Quiz ───────────────────────────────────────────────────────────────────

pub fn questions_per_page() -> usize {
    5
}

pub fn min_questions() -> usize {
    3
}

pub fn max_questions() -> usize {
    5
}
