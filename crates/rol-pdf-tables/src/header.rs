use std::collections::HashMap;

use crate::model::{Cell, DetectedTable, PreparedTable};

/// Turns a header row into unique column names: blank cells become
/// `col_<n>` (1-based) and repeated names get `.1`, `.2`, ... suffixes.
pub(crate) fn column_names(header: &[Cell]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    header
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let base = cell
                .as_text()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map_or_else(|| format!("col_{}", index + 1), str::to_string);

            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

/// Splits a detected table into header names and data rows, dropping data
/// rows that are entirely `Null`. Tables without at least one data row yield
/// `None`.
pub(crate) fn prepare_table(table: &DetectedTable, table_id: usize) -> Option<PreparedTable> {
    let (header, body) = table.rows.split_first()?;
    if body.is_empty() {
        return None;
    }

    let columns = column_names(header);
    let rows = body
        .iter()
        .filter(|row| !row.iter().all(Cell::is_null))
        .map(|row| {
            let mut row = row.clone();
            row.resize(columns.len(), Cell::Null);
            row
        })
        .collect();

    Some(PreparedTable {
        page: table.page,
        table_id,
        columns,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::{column_names, prepare_table};
    use crate::model::{Cell, DetectedTable};

    #[test]
    fn names_blank_and_duplicate_headers() {
        let header = vec![
            Cell::text("OD"),
            Cell::Null,
            Cell::text("OD"),
            Cell::text(" AMB "),
            Cell::text("OD"),
        ];
        assert_eq!(
            column_names(&header),
            vec!["OD", "col_2", "OD.1", "AMB", "OD.2"]
        );
    }

    #[test]
    fn header_only_tables_are_rejected() {
        let table = DetectedTable {
            page: 1,
            rows: vec![vec![Cell::text("OD"), Cell::text("AMB")]],
            confidence: 0.0,
        };
        assert!(prepare_table(&table, 1).is_none());
    }

    #[test]
    fn drops_all_null_data_rows() {
        let table = DetectedTable {
            page: 2,
            rows: vec![
                vec![Cell::text("OD"), Cell::text("AMB")],
                vec![Cell::Null, Cell::Null],
                vec![Cell::text("OD"), Cell::Null],
            ],
            confidence: 1.0,
        };
        let prepared = prepare_table(&table, 3).expect("table has data rows");
        assert_eq!(prepared.rows, vec![vec![Cell::text("OD"), Cell::Null]]);
        assert_eq!(prepared.table_id, 3);
    }
}
