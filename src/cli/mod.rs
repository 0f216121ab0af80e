//! Command-line interface for tutor-render.
//!
//! Argument parsing lives here; the subcommand implementations are in the
//! [`commands`] submodule.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tutor-render - Markdown, table and quiz rendering for a chat tutor
#[derive(Parser)]
#[command(name = "tutor-render")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: ~/.config/tutor-render/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set debug log level (overrides RUST_LOG and DEBUG_LEVEL)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Who wrote the message being rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RoleArg {
    User,
    Assistant,
}

impl From<RoleArg> for crate::conversation::Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::User => crate::conversation::Role::User,
            RoleArg::Assistant => crate::conversation::Role::Assistant,
        }
    }
}

/// Output format for rendered blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Blocks as JSON
    #[default]
    Json,
    /// Reference HTML markup
    Html,
    /// One human-readable line per block
    Debug,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a message (from FILE or stdin) into content blocks
    Render {
        /// Input file; stdin when omitted
        file: Option<PathBuf>,

        /// Render as a user or assistant message
        #[arg(long, value_enum, default_value = "assistant")]
        role: RoleArg,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Simulate streaming: render growing prefixes with a delay between them
        #[arg(long)]
        stream: bool,
    },

    /// Parse model quiz output and optionally score a set of answers
    Quiz {
        /// File holding the raw model output
        file: PathBuf,

        /// Topic used in default improvement suggestions
        #[arg(long, default_value = "Python")]
        topic: String,

        /// Comma-separated option indices, one per question (e.g. 0,2,1)
        #[arg(long, value_delimiter = ',')]
        answers: Option<Vec<usize>>,
    },

    /// Print the configured tutoring catalog as YAML
    Catalog,
}
