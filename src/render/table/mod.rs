//! Table detection, normalization, extraction and cell rendering.
//!
//! Sub-modules:
//! - [`rules`]: the built-in, ordered detection rules
//! - [`detector`]: first-match-wins evaluation and region bounds
//! - [`normalize`]: tab/space tables rewritten as pipe rows
//! - [`extract`]: header/body rows from pipe rows, multi-line cells
//! - [`repair`]: operator-precedence table artifact repair
//! - [`cell`]: per-cell HTML rendering

pub mod cell;
pub mod detector;
pub mod extract;
pub mod normalize;
pub mod repair;
pub mod rules;


pub use cell::{CellContext, render_cell};
pub use detector::{TableDetector, TableDetectorBuilder, TableMatch};
pub use repair::{OperatorSymbol, is_operator_table, operator_column};
pub use rules::{Normalization, TableRule};

use tutor_render_config::RendererConfig;

use crate::render::types::TableData;

/// Turn a detected region into a table, or `None` if it does not hold one.
///
/// Regions found by a non-pipe rule must yield at least two columns.
pub fn build_table(
    region: &str,
    normalization: Normalization,
    config: &RendererConfig,
) -> Option<TableData> {
    let normalized = normalize::normalize(region, normalization);
    let mut table = extract::extract_rows(&normalized)?;

    if normalization != Normalization::Passthrough && table.column_count() < 2 {
        crate::debug_log!("TABLE", "rejected single-column {:?} region", normalization);
        return None;
    }

    if config.operator_repairs && is_operator_table(&table.header_row) {
        repair::repair_operator_table(&mut table);
    }
    Some(table)
}
