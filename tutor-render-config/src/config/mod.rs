//! Top-level `Config` and its per-subsystem sections.
//!
//! Maps to `~/.config/tutor-render/config.yaml`. Every field carries a serde
//! default so a partial (or empty) YAML document loads cleanly.
//!
//! # Sub-modules
//!
//! - [`persistence`]: `load` / `save` (YAML file I/O with atomic write) and
//!   XDG-style path helpers.

mod persistence;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::defaults;
use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// How aggressively unformatted prose is wrapped in inline-code spans.
///
/// The heuristic only runs on messages that contain no backtick at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierHeuristic {
    /// Never wrap anything.
    Off,
    /// Wrap only call-like, dotted, or indexed tokens (`len()`, `math.pi`, `a[i]`).
    Identifiers,
    /// Also wrap every bare alphanumeric token that is not a stopword.
    #[default]
    AllTokens,
}

/// Enable or disable a single built-in table detection rule by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOverride {
    /// Rule id, e.g. `space_aligned_table`.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Settings for the Markdown/table renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Language given to a top-level fence with no tag.
    #[serde(default = "defaults::default_language")]
    pub default_language: String,

    /// Language given to a fence inside a table cell with no tag.
    #[serde(default = "defaults::cell_code_language")]
    pub cell_code_language: String,

    /// Minimum leading spaces for a line to start an indentation-based code run.
    /// `0` disables the detection.
    #[serde(default = "defaults::indent_code_min")]
    pub indent_code_min: usize,

    /// Language tag written on fences synthesized from indented code.
    #[serde(default = "defaults::indent_code_language")]
    pub indent_code_language: String,

    #[serde(default)]
    pub identifier_heuristic: IdentifierHeuristic,

    /// Words never wrapped by the identifier heuristic (compared case-insensitively).
    #[serde(default = "defaults::stopwords")]
    pub stopwords: Vec<String>,

    /// Rewrite bare backtick/caret/backslash/ampersand artifacts in
    /// operator-precedence tables to canonical operator symbols.
    #[serde(default = "defaults::bool_true")]
    pub operator_repairs: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rule_overrides: Vec<RuleOverride>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            default_language: defaults::default_language(),
            cell_code_language: defaults::cell_code_language(),
            indent_code_min: defaults::indent_code_min(),
            indent_code_language: defaults::indent_code_language(),
            identifier_heuristic: IdentifierHeuristic::default(),
            stopwords: defaults::stopwords(),
            operator_repairs: true,
            rule_overrides: Vec::new(),
        }
    }
}

impl RendererConfig {
    /// Case-insensitive stopword lookup.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.iter().any(|w| w.eq_ignore_ascii_case(word))
    }
}

// ---------------------------------------------------------------------------
// Streaming
// ---------------------------------------------------------------------------

/// Simulated streaming of an already-complete response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamingConfig {
    /// Characters revealed per step.
    #[serde(default = "defaults::stream_chunk_size")]
    pub chunk_size: usize,

    /// Pause between steps, in milliseconds.
    #[serde(default = "defaults::stream_delay_ms")]
    pub delay_ms: u64,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            chunk_size: defaults::stream_chunk_size(),
            delay_ms: defaults::stream_delay_ms(),
        }
    }
}

// ---------------------------------------------------------------------------
// Quiz
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    #[serde(default = "defaults::questions_per_page")]
    pub questions_per_page: usize,

    /// Fewer parsed questions than this is treated as a failed generation.
    #[serde(default = "defaults::min_questions")]
    pub min_questions: usize,

    /// Extra questions beyond this are dropped.
    #[serde(default = "defaults::max_questions")]
    pub max_questions: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions_per_page: defaults::questions_per_page(),
            min_questions: defaults::min_questions(),
            max_questions: defaults::max_questions(),
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Complete application configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub renderer: RendererConfig,

    #[serde(default)]
    pub streaming: StreamingConfig,

    #[serde(default)]
    pub quiz: QuizConfig,

    #[serde(default)]
    pub catalog: Catalog,
}

impl Config {
    /// Create a config with every section at its defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.renderer.default_language.trim().is_empty() {
            return Err(ConfigError::Validation(
                "renderer.default_language must not be empty".to_string(),
            ));
        }
        if self.streaming.chunk_size == 0 {
            return Err(ConfigError::Validation(
                "streaming.chunk_size must be at least 1".to_string(),
            ));
        }
        if self.quiz.questions_per_page == 0 {
            return Err(ConfigError::Validation(
                "quiz.questions_per_page must be at least 1".to_string(),
            ));
        }
        if self.quiz.min_questions > self.quiz.max_questions {
            return Err(ConfigError::Validation(format!(
                "quiz.min_questions ({}) exceeds quiz.max_questions ({})",
                self.quiz.min_questions, self.quiz.max_questions
            )));
        }
        Ok(())
    }

    /// Builder-style override of the fallback fence language.
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.renderer.default_language = language.into();
        self
    }

    /// Builder-style override of the identifier heuristic.
    pub fn with_identifier_heuristic(mut self, heuristic: IdentifierHeuristic) -> Self {
        self.renderer.identifier_heuristic = heuristic;
        self
    }
}
