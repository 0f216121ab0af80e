//! Reference HTML serialisation of rendered blocks.
//!
//! Produces structure and class names only; styling is left to the page.

use tutor_render_config::RendererConfig;

use super::inline::escape_html;
use super::table::{CellContext, is_operator_table, operator_column, render_cell};
use super::types::ContentBlock;

/// Serialise `blocks` to HTML, one element per block, newline-separated.
///
/// Code blocks get a `data-code-block-id` of `code-block-N` (N is the block
/// index) for the copy affordance.
pub fn blocks_to_html(blocks: &[ContentBlock], config: &RendererConfig) -> String {
    blocks
        .iter()
        .enumerate()
        .map(|(index, block)| block_to_html(index, block, config))
        .collect::<Vec<_>>()
        .join("\n")
}

fn block_to_html(index: usize, block: &ContentBlock, config: &RendererConfig) -> String {
    match block {
        ContentBlock::PlainText { text } => {
            format!("<p class=\"plain-text\">{}</p>", escape_html(text))
        }
        ContentBlock::FormattedText { html } => {
            format!("<div class=\"formatted-text\">{html}</div>")
        }
        ContentBlock::CodeBlock { language, code } => format!(
            "<pre class=\"code-block\" data-code-block-id=\"code-block-{index}\"><code class=\"language-{}\">{}</code></pre>",
            escape_html(language),
            escape_html(code)
        ),
        ContentBlock::Table {
            header_row,
            body_rows,
        } => table_to_html(header_row, body_rows, config),
    }
}

/// Render a table with every cell passed through [`render_cell`].
///
/// Short body rows are padded to the header width.
pub fn table_to_html(
    header_row: &[String],
    body_rows: &[Vec<String>],
    config: &RendererConfig,
) -> String {
    let op_col = (config.operator_repairs && is_operator_table(header_row))
        .then(|| operator_column(header_row));
    let context = |col: usize| CellContext {
        operator_column: op_col == Some(col),
    };

    let mut html = String::from("<table class=\"markdown-table\">\n<thead>\n<tr>");
    for cell in header_row {
        html.push_str("<th>");
        html.push_str(&render_cell(cell, CellContext::default(), config));
        html.push_str("</th>");
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in body_rows {
        html.push_str("<tr>");
        let width = row.len().max(header_row.len());
        for col in 0..width {
            html.push_str("<td>");
            match row.get(col) {
                Some(raw) => html.push_str(&render_cell(raw, context(col), config)),
                None => html.push_str("&nbsp;"),
            }
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>");
    html
}
