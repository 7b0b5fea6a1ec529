use rol_pdf_tables::{Cell, TabularDataset};

use crate::config::Legend;

/// Cleans the extracted dataset in place and returns the number of dropped
/// rows. Text cells are trimmed first. Then, in every column named after a
/// legend key, values equal to any legend key become that key's label.
/// Rows left with no values are removed last.
///
/// Running it twice yields the same dataset as running it once, provided no
/// label is itself a legend key.
pub fn normalize(dataset: &mut TabularDataset, legend: &Legend) -> usize {
    for row in &mut dataset.rows {
        for cell in &mut row.cells {
            trim_cell(cell);
        }
    }

    for column in legend.columns() {
        let Some(position) = dataset.column_index(column) else {
            tracing::debug!(column, "legend column not present in dataset");
            continue;
        };
        let mut replaced = 0_usize;
        for row in &mut dataset.rows {
            let Some(Cell::Text(value)) = row.cells.get_mut(position) else {
                continue;
            };
            if let Some(label) = legend.expand(value) {
                *value = label.to_string();
                replaced += 1;
            }
        }
        tracing::debug!(column, replaced, "legend applied");
    }

    let dropped = dataset.drop_empty_rows();
    if dropped > 0 {
        tracing::debug!(dropped, "removed empty rows");
    }
    dropped
}

fn trim_cell(cell: &mut Cell) {
    if let Cell::Text(value) = cell {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            *cell = Cell::Null;
        } else if trimmed.len() != value.len() {
            *value = trimmed.to_string();
        }
    }
}
