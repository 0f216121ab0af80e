//! Shared test helpers for renderer tests.
//!
//! Gated with `#[cfg(test)]`. Import with:
//!
//! ```ignore
//! use crate::render::testing::{renderer, renderer_with, strings};
//! ```

use tutor_render_config::RendererConfig;

use super::{ContentBlock, MarkdownRenderer};

/// Renderer with all defaults.
#[allow(dead_code)]
pub fn renderer() -> MarkdownRenderer {
    MarkdownRenderer::default()
}

/// Renderer with a tweaked config.
#[allow(dead_code)]
pub fn renderer_with(tweak: impl FnOnce(&mut RendererConfig)) -> MarkdownRenderer {
    let mut config = RendererConfig::default();
    tweak(&mut config);
    MarkdownRenderer::new(config)
}

#[allow(dead_code)]
pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The header and body of the only table in `blocks`; panics otherwise.
#[allow(dead_code)]
pub fn single_table(blocks: &[ContentBlock]) -> (Vec<String>, Vec<Vec<String>>) {
    let tables: Vec<_> = blocks.iter().filter(|b| b.is_table()).collect();
    assert_eq!(tables.len(), 1, "expected exactly one table in {blocks:#?}");
    match tables[0] {
        ContentBlock::Table {
            header_row,
            body_rows,
        } => (header_row.clone(), body_rows.clone()),
        _ => unreachable!(),
    }
}

/// All `FormattedText` html joined with newlines.
#[allow(dead_code)]
pub fn formatted_html(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .filter_map(|b| match b {
            ContentBlock::FormattedText { html } => Some(html.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}
