//! Row/grid layout helper for the rendering layer.

use crate::schema::FormField;

/// One row of fields as the renderer lays them out.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow<'a> {
    pub fields: Vec<&'a FormField>,
}

/// Chunk fields into rows of at most `columns_per_row`, preserving order.
///
/// A column count of zero is treated as one column.
pub fn organize_into_rows(fields: &[FormField], columns_per_row: usize) -> Vec<FieldRow<'_>> {
    let columns = columns_per_row.max(1);
    fields
        .chunks(columns)
        .map(|chunk| FieldRow {
            fields: chunk.iter().collect(),
        })
        .collect()
}

/// CSS grid template for a column count, e.g. `repeat(2, 1fr)`.
pub fn grid_template(columns: usize) -> String {
    format!("repeat({columns}, 1fr)")
}
