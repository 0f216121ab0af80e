//! Output types of the renderer.

use serde::{Deserialize, Serialize};

/// One renderable block of a chat message.
///
/// The presentation layer matches on this exhaustively; see
/// [`super::html::blocks_to_html`] for the reference serialisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Text shown verbatim (user messages).
    PlainText { text: String },
    /// Escaped text with inline bold/italic/code and heading markup resolved.
    FormattedText { html: String },
    CodeBlock { language: String, code: String },
    /// A table with raw, unrendered cell text.
    ///
    /// Cells may still contain inline markup or a nested fence; they are
    /// rendered independently by [`super::table::render_cell`].
    Table {
        header_row: Vec<String>,
        body_rows: Vec<Vec<String>>,
    },
}

impl ContentBlock {
    /// Short lowercase name of the variant, used in debug output.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::PlainText { .. } => "plain_text",
            ContentBlock::FormattedText { .. } => "formatted_text",
            ContentBlock::CodeBlock { .. } => "code_block",
            ContentBlock::Table { .. } => "table",
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, ContentBlock::Table { .. })
    }

    pub fn is_code(&self) -> bool {
        matches!(self, ContentBlock::CodeBlock { .. })
    }
}

/// A table before it becomes a [`ContentBlock::Table`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableData {
    pub header_row: Vec<String>,
    pub body_rows: Vec<Vec<String>>,
}

impl TableData {
    pub fn column_count(&self) -> usize {
        self.body_rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header_row.len()))
            .max()
            .unwrap_or(0)
    }

    pub fn into_block(self) -> ContentBlock {
        ContentBlock::Table {
            header_row: self.header_row,
            body_rows: self.body_rows,
        }
    }
}
