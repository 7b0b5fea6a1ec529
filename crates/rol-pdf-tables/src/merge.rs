use crate::model::{Cell, PreparedTable, TabularDataset};

/// Concatenates per-table rows into one dataset.
///
/// Columns are the union of all table columns in first-seen order. A table
/// that lacks a column contributes `Null` for it. Rows are re-indexed from 0
/// in concatenation order.
pub(crate) fn merge_tables(tables: &[PreparedTable]) -> TabularDataset {
    let mut columns: Vec<String> = Vec::new();
    for table in tables {
        for column in &table.columns {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
    }

    let mut dataset = TabularDataset::new(columns);
    let mut next_index = 0_usize;
    for table in tables {
        let positions = table
            .columns
            .iter()
            .map(|column| dataset.column_index(column))
            .collect::<Vec<_>>();

        for source in &table.rows {
            let mut cells = vec![Cell::Null; dataset.columns.len()];
            for (cell, position) in source.iter().zip(&positions) {
                if let Some(position) = position {
                    cells[*position] = cell.clone();
                }
            }
            dataset.push_row(next_index, cells);
            next_index += 1;
        }
    }

    dataset
}
