//! Subcommand implementations.

use anyhow::{Context, Result};
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Duration;

use super::{Commands, OutputFormat};
use crate::config::Config;
use crate::conversation::{Message, Role, StreamChunks};
use crate::quiz::{QuizSession, parse_quiz};
use crate::render::{ContentBlock, MarkdownRenderer, html};

/// Load the config from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            Config::load_from(path).with_context(|| format!("loading config {}", path.display()))
        }
        None => Config::load(),
    }
}

/// Run one subcommand.
pub fn run(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Render {
            file,
            role,
            format,
            stream,
        } => {
            let content = read_input(file.as_deref())?;
            render_cmd(&content, role.into(), format, stream, config)
        }
        Commands::Quiz {
            file,
            topic,
            answers,
        } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("reading quiz output {}", file.display()))?;
            quiz_cmd(&raw, &topic, answers.as_deref(), config)
        }
        Commands::Catalog => {
            let yaml = serde_yaml_ng::to_string(&config.catalog).context("serialising catalog")?;
            print!("{yaml}");
            Ok(())
        }
    }
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading input {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn format_blocks(blocks: &[ContentBlock], format: OutputFormat, config: &Config) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(blocks).context("serialising blocks")?
        }
        OutputFormat::Html => html::blocks_to_html(blocks, &config.renderer),
        OutputFormat::Debug => blocks
            .iter()
            .map(debug_line)
            .collect::<Vec<_>>()
            .join("\n"),
    })
}

fn debug_line(block: &ContentBlock) -> String {
    match block {
        ContentBlock::PlainText { text } => format!("[plain_text] {text:?}"),
        ContentBlock::FormattedText { html } => format!("[formatted_text] {html:?}"),
        ContentBlock::CodeBlock { language, code } => {
            format!("[code_block {language}] {} lines", code.lines().count())
        }
        ContentBlock::Table {
            header_row,
            body_rows,
        } => format!(
            "[table] {} columns, {} rows: {:?}",
            header_row.len(),
            body_rows.len(),
            header_row
        ),
    }
}

fn render_cmd(
    content: &str,
    role: Role,
    format: OutputFormat,
    stream: bool,
    config: &Config,
) -> Result<()> {
    let renderer = MarkdownRenderer::new(config.renderer.clone());
    let mut stdout = io::stdout().lock();

    if !stream {
        let message = Message {
            role,
            content: content.to_string(),
            response_time_seconds: None,
        };
        let blocks = renderer.render_message(&message);
        writeln!(stdout, "{}", format_blocks(&blocks, format, config)?)?;
        return Ok(());
    }

    let delay = Duration::from_millis(config.streaming.delay_ms);
    log::info!(
        "Streaming {} bytes in chunks of {} chars",
        content.len(),
        config.streaming.chunk_size
    );
    for (frame, prefix) in StreamChunks::new(content, config.streaming.chunk_size).enumerate() {
        let message = Message {
            role,
            content: prefix.to_string(),
            response_time_seconds: None,
        };
        let blocks = renderer.render_message(&message);
        let rendered = match format {
            // One JSON document per line so frames can be consumed incrementally.
            OutputFormat::Json => serde_json::to_string(&blocks).context("serialising blocks")?,
            other => format!("--- frame {frame} ---\n{}", format_blocks(&blocks, other, config)?),
        };
        writeln!(stdout, "{rendered}")?;
        stdout.flush()?;
        std::thread::sleep(delay);
    }
    Ok(())
}

fn quiz_cmd(raw: &str, topic: &str, answers: Option<&[usize]>, config: &Config) -> Result<()> {
    let questions = parse_quiz(raw, topic, &config.quiz).context("parsing quiz output")?;

    let output = match answers {
        None => serde_json::json!({ "questions": questions }),
        Some(answers) => {
            let mut session = QuizSession::new(questions, &config.quiz);
            for (question, &option) in answers.iter().enumerate() {
                session
                    .answer(question, option)
                    .with_context(|| format!("recording answer {option} for question {question}"))?;
            }
            let score = session.submit().context("scoring quiz")?;
            let verdict = session.verdict();
            serde_json::json!({
                "questions": session.questions(),
                "answers": answers,
                "score": score,
                "total": session.questions().len(),
                "verdict": verdict,
                "message": verdict.map(|v| v.message()),
            })
        }
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("serialising quiz")?
    );
    Ok(())
}
