use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningCode {
    LowConfidence,
    SingleRowTableDiscarded,
    DocumentTextFallback,
}

impl WarningCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LowConfidence => "low_confidence",
            Self::SingleRowTableDiscarded => "single_row_table",
            Self::DocumentTextFallback => "document_text_fallback",
        }
    }
}

/// Non-fatal observation made while extracting tables.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractWarning {
    pub code: WarningCode,
    pub page: Option<u32>,
    pub table_id: Option<usize>,
    pub confidence: Option<f32>,
}

impl ExtractWarning {
    #[must_use]
    pub const fn low_confidence(page: u32, table_id: usize, confidence: f32) -> Self {
        Self {
            code: WarningCode::LowConfidence,
            page: Some(page),
            table_id: Some(table_id),
            confidence: Some(confidence),
        }
    }

    #[must_use]
    pub const fn single_row(page: u32, table_id: usize) -> Self {
        Self {
            code: WarningCode::SingleRowTableDiscarded,
            page: Some(page),
            table_id: Some(table_id),
            confidence: None,
        }
    }

    #[must_use]
    pub const fn document_fallback() -> Self {
        Self {
            code: WarningCode::DocumentTextFallback,
            page: None,
            table_id: None,
            confidence: None,
        }
    }
}

impl Display for ExtractWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code.as_str())?;
        if let Some(page) = self.page {
            write!(f, " page={page}")?;
        }
        if let Some(table_id) = self.table_id {
            write!(f, " table={table_id}")?;
        }
        if let Some(confidence) = self.confidence {
            write!(f, " confidence={confidence:.2}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionReport {
    /// Tables that contributed to the dataset.
    pub table_count: usize,
    /// Header-only tables that were skipped.
    pub discarded_tables: usize,
    pub row_count: usize,
    pub warnings: Vec<ExtractWarning>,
}
