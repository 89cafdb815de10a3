use crate::domain::Table;

pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Flags every cell whose confidence falls strictly below the threshold.
///
/// Purely additive: values are never altered or dropped, rows are never
/// filtered, and re-annotating with the same threshold is a no-op.
pub fn annotate(mut table: Table, threshold: f64) -> Table {
    for row in &mut table.rows {
        for cell in &mut row.cells {
            cell.low_confidence = cell.confidence < threshold;
        }
    }
    table
}
