//! Rendering one raw table cell to HTML.

use tutor_render_config::RendererConfig;

use super::repair::OperatorSymbol;
use crate::render::inline::{escape_html, format_inline};
use crate::render::segment::{SegmentKind, segment};

/// Where a cell sits, as far as rendering is concerned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellContext {
    /// The cell is in the symbol column of an operator-precedence table.
    pub operator_column: bool,
}

/// Render a raw cell: embedded fences become `<pre>` blocks, everything else
/// gets inline formatting, newlines become `<br>`, and an empty cell becomes
/// `&nbsp;`.
pub fn render_cell(raw: &str, context: CellContext, config: &RendererConfig) -> String {
    let text = raw.trim();

    if context.operator_column
        && config.operator_repairs
        && let Some(symbol) = OperatorSymbol::from_artifact(text)
    {
        return format!(
            "<span class=\"operator-symbol\">{}</span>",
            escape_html(symbol.glyph())
        );
    }

    let html = if text.contains("```") {
        render_fenced_cell(text, config)
    } else {
        inline_with_breaks(text)
    };

    if html.trim().is_empty() {
        "&nbsp;".to_string()
    } else {
        html
    }
}

fn inline_with_breaks(text: &str) -> String {
    format_inline(text, None).replace('\n', "<br>")
}

fn render_fenced_cell(text: &str, config: &RendererConfig) -> String {
    let mut html = String::new();
    for seg in segment(text) {
        match &seg.kind {
            SegmentKind::Code { language, code, .. } => {
                let language = language.as_deref().unwrap_or(&config.cell_code_language);
                html.push_str(&format!(
                    "<pre class=\"code-block\"><code class=\"language-{}\">{}</code></pre>",
                    escape_html(language),
                    escape_html(code)
                ));
            }
            SegmentKind::Text => {
                let part = seg.source(text).trim_matches('\n');
                if !part.trim().is_empty() {
                    html.push_str(&inline_with_breaks(part));
                }
            }
        }
    }
    html
}
