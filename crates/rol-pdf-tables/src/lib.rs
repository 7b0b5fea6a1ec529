//! Table extraction from text-based PDFs.
//!
//! Every page is read as text, consecutive column-aligned lines are grouped
//! into tables, the first line of each table names its columns, and all
//! tables are concatenated into a single [`TabularDataset`].

mod csv_out;
mod error;
mod header;
mod merge;
mod model;
mod options;
mod pdf_reader;
mod report;
mod table_detect;
mod table_parse;

use std::path::Path;

use crate::header::prepare_table;
use crate::merge::merge_tables;
use crate::model::{DetectedTable, PageText};
use crate::pdf_reader::{PdfText, read_pdf_pages, read_pdf_pages_from_bytes};
use crate::table_detect::{LOW_CONFIDENCE_THRESHOLD, detect_tables};

pub use csv_out::{read_csv, write_csv, write_csv_to};
pub use error::ExtractError;
pub use model::{Cell, Row, TabularDataset};
pub use options::{ExtractOptions, PageSelection};
pub use report::{ExtractWarning, ExtractionReport, WarningCode};

fn detect_with_fallback(
    text: &PdfText,
    options: &ExtractOptions,
    report: &mut ExtractionReport,
) -> Vec<DetectedTable> {
    let tables = detect_tables(&text.pages, options.min_cols);
    if tables.iter().any(|table| table.rows.len() > 1) {
        return tables;
    }

    let Some(full_text) = text.full_text.as_deref() else {
        return tables;
    };
    let document_pages = full_text
        .split('\u{000C}')
        .zip(1..)
        .map(|(text, page_number)| PageText {
            page_number,
            text: text.to_string(),
        })
        .collect::<Vec<_>>();
    let fallback = detect_tables(&document_pages, options.min_cols);
    if fallback.iter().any(|table| table.rows.len() > 1) {
        tracing::debug!("no page-level tables; using document-level text");
        report.warnings.push(ExtractWarning::document_fallback());
        return fallback;
    }

    tables
}

/// Turns page text into one dataset. Header-only tables are discarded, data
/// rows that are entirely empty are dropped per table, and the remaining
/// tables are concatenated with fresh row indices.
fn extract_from_text(
    text: &PdfText,
    options: &ExtractOptions,
) -> Result<(TabularDataset, ExtractionReport), ExtractError> {
    if options.min_cols < 2 {
        return Err(ExtractError::InvalidOption(
            "min_cols must be at least 2".to_string(),
        ));
    }

    let mut report = ExtractionReport::default();
    let detected = detect_with_fallback(text, options, &mut report);

    let mut prepared = Vec::new();
    for (index, table) in detected.iter().enumerate() {
        let table_id = index + 1;
        let Some(prepared_table) = prepare_table(table, table_id) else {
            report.discarded_tables += 1;
            report
                .warnings
                .push(ExtractWarning::single_row(table.page, table_id));
            continue;
        };

        if table.confidence < LOW_CONFIDENCE_THRESHOLD {
            report.warnings.push(ExtractWarning::low_confidence(
                table.page,
                table_id,
                table.confidence,
            ));
        }
        prepared.push(prepared_table);
    }

    if prepared.is_empty() {
        return Err(ExtractError::NoTablesFound);
    }

    let dataset = merge_tables(&prepared);
    report.table_count = prepared.len();
    report.row_count = dataset.len();
    tracing::debug!(
        tables = report.table_count,
        discarded = report.discarded_tables,
        rows = report.row_count,
        "tables concatenated"
    );

    Ok((dataset, report))
}

/// Extracts every table of the PDF at `input_pdf` into one dataset.
///
/// # Errors
///
/// [`ExtractError::InvalidDocument`] when the file is not a readable PDF and
/// [`ExtractError::NoTablesFound`] when no page holds a table with a header
/// and at least one data row.
pub fn extract_tables(
    input_pdf: &Path,
    options: &ExtractOptions,
) -> Result<(TabularDataset, ExtractionReport), ExtractError> {
    let text = read_pdf_pages(input_pdf, options.pages.as_ref())?;
    extract_from_text(&text, options)
}

/// In-memory variant of [`extract_tables`].
///
/// # Errors
///
/// Same as [`extract_tables`].
pub fn extract_tables_from_bytes(
    input_pdf: &[u8],
    options: &ExtractOptions,
) -> Result<(TabularDataset, ExtractionReport), ExtractError> {
    let text = read_pdf_pages_from_bytes(input_pdf, options.pages.as_ref())?;
    extract_from_text(&text, options)
}
