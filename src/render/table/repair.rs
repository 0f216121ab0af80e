//! Best-effort repair of operator-precedence tables.
//!
//! Models often emit the bitwise operator rows of a precedence table with
//! the symbol broken by pipe splitting: an empty cell, a lone backtick, a
//! backslash. These are rewritten to canonical operator symbols. The pass is
//! lossy and only runs on tables whose header looks like a precedence table.

use crate::render::types::TableData;

/// Canonical bitwise operators recovered from artifact cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorSymbol {
    Or,
    Xor,
    And,
}

impl OperatorSymbol {
    /// Classify an operator cell. Whitespace inside the cell is ignored.
    pub fn from_artifact(cell: &str) -> Option<Self> {
        let compact: String = cell.split_whitespace().collect();
        match compact.as_str() {
            "" | "`" | "``" | "\\" | "`\\`" | "|" | "`|`" | "`\\|`" => Some(Self::Or),
            "^" | "`^`" => Some(Self::Xor),
            "&" | "`&`" => Some(Self::And),
            _ => None,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Or => "|",
            Self::Xor => "^",
            Self::And => "&",
        }
    }

    /// The cell text written back into a repaired table.
    pub fn canonical(self) -> String {
        format!("`{}`", self.glyph())
    }

    pub fn note(self) -> &'static str {
        match self {
            Self::Or => "Bitwise OR.",
            Self::Xor => "Bitwise XOR.",
            Self::And => "Bitwise AND.",
        }
    }
}

fn header_has(header: &[String], needles: &[&str]) -> bool {
    header.iter().any(|h| {
        let h = h.to_lowercase();
        needles.iter().any(|n| h.contains(n))
    })
}

/// `true` when the header names a precedence column, an operator column,
/// and a descriptive column.
pub fn is_operator_table(header: &[String]) -> bool {
    header_has(header, &["level", "precedence"])
        && header_has(header, &["operator", "category"])
        && header_has(header, &["notes", "associativity"])
}

/// Index of the column holding operator symbols.
pub fn operator_column(header: &[String]) -> usize {
    header
        .iter()
        .position(|h| {
            let h = h.to_lowercase();
            h.contains("operator") || h.contains("symbol")
        })
        .unwrap_or(1)
}

fn notes_column(header: &[String]) -> Option<usize> {
    header.iter().position(|h| h.to_lowercase().contains("note"))
}

/// Rewrite artifact operator cells in place. Returns the number of rows changed.
pub fn repair_operator_table(table: &mut TableData) -> usize {
    let op_col = operator_column(&table.header_row);
    let notes_col = notes_column(&table.header_row);
    let mut repaired = 0;

    for row in &mut table.body_rows {
        let Some(symbol) = row.get(op_col).and_then(|c| OperatorSymbol::from_artifact(c)) else {
            continue;
        };
        row[op_col] = symbol.canonical();
        if let Some(nc) = notes_col
            && let Some(note) = row.get_mut(nc)
            && note.trim().is_empty()
        {
            *note = symbol.note().to_string();
        }
        repaired += 1;
    }

    if repaired > 0 {
        crate::debug_log!("TABLE", "repaired {} operator rows", repaired);
    }
    repaired
}
