use std::io;

use rol_pdf_tables::ExtractError;
use thiserror::Error;

use crate::http::HttpError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to fetch page content: {0}")]
    Fetch(#[source] HttpError),

    #[error("no PDF link found matching the pattern")]
    NoLinkFound,

    #[error("failed to download PDF after {attempts} attempts: {source}")]
    Download {
        attempts: u32,
        #[source]
        source: HttpError,
    },

    #[error("invalid or corrupted PDF file: {0}")]
    InvalidDocument(String),

    #[error("no tables found in PDF")]
    NoTablesFound,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PipelineError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "fetch_failure",
            Self::NoLinkFound => "no_link_found",
            Self::Download { .. } => "download_failure",
            Self::InvalidDocument(_) => "invalid_document",
            Self::NoTablesFound => "no_tables_found",
            Self::Io(_) => "io_failure",
            Self::Config(_) => "invalid_config",
        }
    }
}

impl From<ExtractError> for PipelineError {
    fn from(error: ExtractError) -> Self {
        match error {
            ExtractError::NoTablesFound => Self::NoTablesFound,
            ExtractError::Io(error) => Self::Io(error),
            ExtractError::Csv(error) => Self::Io(io::Error::other(error)),
            ExtractError::MalformedCsv(message) => {
                Self::Io(io::Error::new(io::ErrorKind::InvalidData, message))
            }
            ExtractError::InvalidDocument(error) => Self::InvalidDocument(error.to_string()),
            other => Self::InvalidDocument(other.to_string()),
        }
    }
}

impl From<zip::result::ZipError> for PipelineError {
    fn from(error: zip::result::ZipError) -> Self {
        Self::Io(io::Error::other(error))
    }
}

impl From<tempfile::PersistError> for PipelineError {
    fn from(error: tempfile::PersistError) -> Self {
        Self::Io(error.error)
    }
}

#[cfg(test)]
mod tests {
    use rol_pdf_tables::ExtractError;

    use super::PipelineError;

    #[test]
    fn maps_extraction_errors_onto_pipeline_kinds() {
        assert_eq!(
            PipelineError::from(ExtractError::NoTablesFound).kind(),
            "no_tables_found"
        );
        assert_eq!(
            PipelineError::from(ExtractError::NoPagesSelected).kind(),
            "invalid_document"
        );
        assert_eq!(
            PipelineError::from(ExtractError::MalformedCsv("bad index".to_string())).kind(),
            "io_failure"
        );
        assert_eq!(
            PipelineError::from(ExtractError::Io(std::io::Error::other("disk full"))).kind(),
            "io_failure"
        );
    }
}
