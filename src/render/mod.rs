//! Markdown renderer for chat messages.
//!
//! Turns a raw message string into a sequence of [`ContentBlock`]s: fenced
//! code, tables, and inline-formatted prose. Rendering is a pure function of
//! the input and the [`RendererConfig`]; calling it again on the same text
//! (or on a growing prefix while a response streams in) yields the same
//! blocks.
//!
//! Sub-modules:
//! - [`types`]: output block types
//! - [`segment`]: code fence segmentation
//! - [`table`]: table detection, normalization, extraction, cells
//! - [`inline`]: inline code/bold/italic spans and HTML escaping
//! - [`prose`]: prose clean-up, indentation code, headings
//! - [`html`]: reference HTML serialisation
//! - `regexes`: shared compiled patterns

pub mod html;
pub mod inline;
pub mod prose;
mod regexes;
pub mod segment;
pub mod table;
pub mod types;

#[cfg(test)]
mod testing;
#[cfg(test)]
mod tests;

pub use segment::{Segment, SegmentKind};
pub use table::{TableDetector, TableRule};
pub use types::{ContentBlock, TableData};

use std::borrow::Cow;

use tutor_render_config::{IdentifierHeuristic, RendererConfig};

use crate::conversation::{Message, Role};
use prose::ProsePiece;

/// Per-message switches decided once before the text spans are walked.
#[derive(Debug, Clone, Copy)]
struct ProseOptions {
    /// Wrap probable identifiers in inline code.
    identifiers: bool,
    /// Look for a bare language line introducing unfenced code.
    language_indicator: bool,
}

/// Renders chat messages into [`ContentBlock`]s.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    config: RendererConfig,
    detector: TableDetector,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}

impl MarkdownRenderer {
    /// Create a renderer; `rule_overrides` from the config are applied to
    /// the built-in table rules.
    pub fn new(config: RendererConfig) -> Self {
        let mut detector = TableDetector::builtin();
        detector.apply_overrides(&config.rule_overrides);
        log::debug!(
            "MarkdownRenderer created: default_language={}, heuristic={:?}, {} table rules",
            config.default_language,
            config.identifier_heuristic,
            detector.rules().iter().filter(|r| r.enabled).count()
        );
        Self { config, detector }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn detector(&self) -> &TableDetector {
        &self.detector
    }

    /// Render a message according to its role.
    pub fn render_message(&self, message: &Message) -> Vec<ContentBlock> {
        match message.role {
            Role::User => self.render_user(&message.content),
            Role::Assistant => self.render(&message.content),
        }
    }

    /// Render user-typed text: fenced code becomes code blocks, everything
    /// else stays plain text.
    pub fn render_user(&self, content: &str) -> Vec<ContentBlock> {
        if content.trim().is_empty() {
            return Vec::new();
        }
        segment::segment(content)
            .into_iter()
            .filter_map(|seg| match seg.kind {
                SegmentKind::Code { language, code, .. } => Some(self.code_block(language, code)),
                SegmentKind::Text => {
                    let text = seg.source(content).trim_matches(['\n', '\r']);
                    (!text.trim().is_empty()).then(|| ContentBlock::PlainText {
                        text: text.to_string(),
                    })
                }
            })
            .collect()
    }

    /// Render assistant text with the full pipeline.
    pub fn render(&self, content: &str) -> Vec<ContentBlock> {
        if content.trim().is_empty() {
            return Vec::new();
        }
        let content = normalize_newlines(content);
        let content: &str = &content;

        let fenced = segment::has_fence(content);
        let source: Cow<'_, str> = if fenced {
            Cow::Borrowed(content)
        } else {
            Cow::Owned(prose::fence_indented_code(
                content,
                self.config.indent_code_min,
                &self.config.indent_code_language,
            ))
        };
        let options = ProseOptions {
            identifiers: self.config.identifier_heuristic != IdentifierHeuristic::Off
                && !content.contains('`'),
            language_indicator: !fenced,
        };
        crate::debug_trace!("RENDER", "render {} bytes, options={:?}", content.len(), options);

        let mut blocks = Vec::new();
        for seg in segment::segment(&source) {
            match seg.kind {
                SegmentKind::Code {
                    language,
                    code,
                    terminated,
                } => {
                    if !terminated {
                        crate::debug_trace!(
                            "RENDER",
                            "open fence rendered to end of input ({} code bytes)",
                            code.len()
                        );
                    }
                    blocks.push(self.code_block(language, code));
                }
                SegmentKind::Text => {
                    self.render_text(&source[seg.range.clone()], options, &mut blocks);
                }
            }
        }

        crate::debug_log!(
            "RENDER",
            "{} blocks: [{}]",
            blocks.len(),
            blocks.iter().map(ContentBlock::kind).collect::<Vec<_>>().join(", ")
        );
        blocks
    }

    /// Render `blocks` of `content` straight to HTML.
    pub fn render_html(&self, content: &str) -> String {
        html::blocks_to_html(&self.render(content), &self.config)
    }

    fn code_block(&self, language: Option<String>, code: String) -> ContentBlock {
        ContentBlock::CodeBlock {
            language: language.unwrap_or_else(|| self.config.default_language.clone()),
            code,
        }
    }

    /// Split a text span around detected tables. Text before and after a
    /// table is searched again, so several tables in one span all render.
    fn render_text(&self, text: &str, options: ProseOptions, out: &mut Vec<ContentBlock>) {
        if text.trim().is_empty() {
            return;
        }
        let Some(hit) = self.detector.detect(text) else {
            self.render_prose(text, options, out);
            return;
        };

        self.render_text(&text[..hit.range.start], options, out);
        let region = &text[hit.range.clone()];
        match table::build_table(region, hit.normalization, &self.config) {
            Some(table) => out.push(table.into_block()),
            None => self.render_prose(region, options, out),
        }
        self.render_text(&text[hit.range.end..], options, out);
    }

    fn render_prose(&self, text: &str, options: ProseOptions, out: &mut Vec<ContentBlock>) {
        let cleaned = prose::clean(text);
        if cleaned.is_empty() {
            return;
        }

        let pieces = if options.language_indicator {
            prose::split_language_indicator(&cleaned, &self.config.default_language)
        } else {
            vec![ProsePiece::Text(cleaned)]
        };

        for piece in pieces {
            match piece {
                ProsePiece::Code(code) => out.push(ContentBlock::CodeBlock {
                    language: self.config.default_language.clone(),
                    code,
                }),
                ProsePiece::Text(text) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        out.push(ContentBlock::FormattedText {
                            html: prose::format_prose(text, &self.config, options.identifiers),
                        });
                    }
                }
            }
        }
    }
}

/// Rewrite CRLF line endings to LF; the table rules match on `\n` only.
fn normalize_newlines(content: &str) -> Cow<'_, str> {
    if content.contains("\r\n") {
        Cow::Owned(content.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(content)
    }
}
