#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub page_number: u32,
    pub text: String,
}

/// Raw table as detected on a page: row 0 is the header line.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedTable {
    pub page: u32,
    pub rows: Vec<Vec<Cell>>,
    pub confidence: f32,
}

/// A single cell value. Blank text is never stored as `Text`; the extractor
/// turns it into `Null`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cell {
    Text(String),
    Null,
}

impl Cell {
    /// Builds a cell from extracted text, mapping blank input to `Null`.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Self::Null
        } else {
            Self::Text(raw.to_string())
        }
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Null => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Position assigned when the per-page tables were concatenated.
    pub index: usize,
    pub cells: Vec<Cell>,
}

impl Row {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_null)
    }

    #[must_use]
    pub fn get(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }
}

/// Header-named table produced from one detected table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTable {
    pub page: u32,
    pub table_id: usize,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Ordered rows sharing one column layout. Every row holds exactly
/// `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularDataset {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl TabularDataset {
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding or truncating it to the column count.
    pub fn push_row(&mut self, index: usize, mut cells: Vec<Cell>) {
        cells.resize(self.columns.len(), Cell::Null);
        self.rows.push(Row { index, cells });
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Removes rows whose cells are all `Null`. Returns how many were dropped.
    pub fn drop_empty_rows(&mut self) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| !row.is_empty());
        before - self.rows.len()
    }

    /// Cell lookup by row position and column name.
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let column = self.column_index(column)?;
        self.rows.get(row).and_then(|row| row.get(column))
    }
}
