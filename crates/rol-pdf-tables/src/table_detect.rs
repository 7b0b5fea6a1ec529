use crate::model::{Cell, DetectedTable, PageText};
use crate::table_parse::{
    Span, align_to_header, modal_width, soft_split_line_into_spans, split_line_into_spans,
};

pub(crate) const LOW_CONFIDENCE_THRESHOLD: f32 = 0.60;

#[allow(clippy::cast_precision_loss)]
fn table_confidence(rows: &[Vec<Span>]) -> f32 {
    if rows.len() < 2 {
        return 0.0;
    }

    let modal = modal_width(rows);
    if modal == 0 {
        return 0.0;
    }

    let consistent =
        rows.iter().filter(|row| row.len() == modal).count() as f32 / rows.len() as f32;
    let max_width = rows.iter().map(Vec::len).max().unwrap_or(modal);
    let min_width = rows.iter().map(Vec::len).min().unwrap_or(modal);
    let uniformity = if max_width == 0 {
        0.0
    } else {
        1.0 - ((max_width - min_width) as f32 / max_width as f32)
    };

    (consistent * 0.75 + uniformity * 0.25).clamp(0.0, 1.0)
}

/// How a candidate line was cut into cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Split {
    /// Tabs or runs of two or more spaces.
    Hard,
    /// Every whitespace run.
    Soft,
}

/// Cells of a candidate table line, or `None` when the line is prose.
fn line_cells(line: &str, min_cols: usize) -> Option<(Split, Vec<Span>)> {
    let spans = split_line_into_spans(line);
    if spans.len() >= min_cols {
        return Some((Split::Hard, spans));
    }

    let soft = soft_split_line_into_spans(line);
    let has_numeric = soft
        .iter()
        .any(|span| span.text.chars().any(|ch| ch.is_ascii_digit()));
    let looks_like_sentence = ['.', '!', '?', ':', ';']
        .iter()
        .any(|punctuation| line.trim_end().ends_with(*punctuation));
    if soft.len() >= min_cols && !looks_like_sentence && (has_numeric || soft.len() <= 6) {
        return Some((Split::Soft, soft));
    }

    None
}

/// A soft-split line only extends a table already open, and only when it has
/// exactly as many cells as that table's header.
fn continues_table(current: &[Vec<Span>], cells: &[Span]) -> bool {
    current
        .first()
        .is_some_and(|header| header.len() == cells.len())
}

fn build_table(page: u32, lines: &[Vec<Span>]) -> Option<DetectedTable> {
    let (header, body) = lines.split_first()?;

    let mut rows = Vec::with_capacity(lines.len());
    rows.push(header.iter().map(|span| Cell::from_raw(&span.text)).collect());
    rows.extend(body.iter().map(|line| align_to_header(header, line)));

    Some(DetectedTable {
        page,
        rows,
        confidence: table_confidence(lines),
    })
}

/// Groups consecutive table-like lines of a page into tables. Single-line
/// groups are returned too; the caller decides what to keep.
///
/// Tables always start on a hard-split line, so titles and page footers
/// written with single spaces never become headers or rows.
pub(crate) fn detect_tables_in_page(page: &PageText, min_cols: usize) -> Vec<DetectedTable> {
    let mut tables = Vec::new();
    let mut current: Vec<Vec<Span>> = Vec::new();

    let flush = |current: &mut Vec<Vec<Span>>, tables: &mut Vec<DetectedTable>| {
        if let Some(table) = build_table(page.page_number, current) {
            tables.push(table);
        }
        current.clear();
    };

    for line in page.text.lines() {
        match line_cells(line, min_cols) {
            Some((Split::Hard, cells)) => current.push(cells),
            Some((Split::Soft, cells)) if continues_table(&current, &cells) => {
                current.push(cells);
            }
            _ => flush(&mut current, &mut tables),
        }
    }

    flush(&mut current, &mut tables);
    tables
}

pub(crate) fn detect_tables(pages: &[PageText], min_cols: usize) -> Vec<DetectedTable> {
    pages
        .iter()
        .flat_map(|page| detect_tables_in_page(page, min_cols.max(2)))
        .collect()
}
