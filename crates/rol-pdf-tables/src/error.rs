use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed CSV: {0}")]
    MalformedCsv(String),

    #[error("invalid or corrupted PDF file: {0}")]
    InvalidDocument(#[from] lopdf::Error),

    #[error("invalid page selection: {0}")]
    InvalidPageSelection(String),

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("no pages available after applying selection")]
    NoPagesSelected,

    #[error("no tables found in PDF")]
    NoTablesFound,
}
