//! Configuration system for the tutor-render chat renderer.
//!
//! This crate provides configuration loading, saving, and default values
//! for the renderer and its surrounding tutoring front end. It includes:
//!
//! - Markdown renderer settings (fallback languages, heuristics, rule toggles)
//! - Simulated streaming and quiz pagination settings
//! - The tutoring catalog (models, languages, chapters, familiarity levels)

pub mod catalog;
pub mod config;
pub mod defaults;
pub mod error;

pub use catalog::{Catalog, Chapter};
pub use config::{
    Config, IdentifierHeuristic, QuizConfig, RendererConfig, RuleOverride, StreamingConfig,
};
pub use error::ConfigError;
