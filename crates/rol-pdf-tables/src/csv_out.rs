use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::ExtractError;
use crate::model::{Cell, TabularDataset};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes `dataset` as BOM-prefixed UTF-8 CSV. The first column holds the row
/// index and has an empty header; `Null` cells are written as empty fields.
pub fn write_csv_to<W: Write>(mut writer: W, dataset: &TabularDataset) -> Result<(), ExtractError> {
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    let mut header = Vec::with_capacity(dataset.columns.len() + 1);
    header.push(String::new());
    header.extend(dataset.columns.iter().cloned());
    csv_writer.write_record(&header)?;

    for row in &dataset.rows {
        let mut record = Vec::with_capacity(row.cells.len() + 1);
        record.push(row.index.to_string());
        record.extend(
            row.cells
                .iter()
                .map(|cell| cell.as_text().unwrap_or_default().to_string()),
        );
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_csv(path: &Path, dataset: &TabularDataset) -> Result<(), ExtractError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_csv_to(&mut writer, dataset)?;
    writer.flush()?;
    Ok(())
}

/// Reads a file produced by [`write_csv`] back into a dataset. Empty fields
/// come back as `Null`.
pub fn read_csv(path: &Path) -> Result<TabularDataset, ExtractError> {
    let mut bytes = Vec::new();
    File::open(path)?.read_to_end(&mut bytes)?;
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

    let mut reader = ReaderBuilder::new().from_reader(body);
    let columns = reader
        .headers()?
        .iter()
        .skip(1)
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut dataset = TabularDataset::new(columns);
    for record in reader.records() {
        let record = record?;
        let index = record
            .get(0)
            .unwrap_or_default()
            .parse::<usize>()
            .map_err(|error| {
                ExtractError::MalformedCsv(format!(
                    "row index {:?} on line {}: {error}",
                    record.get(0).unwrap_or_default(),
                    record.position().map_or(0, csv::Position::line)
                ))
            })?;
        let cells = record.iter().skip(1).map(Cell::from_raw).collect();
        dataset.push_row(index, cells);
    }

    Ok(dataset)
}
