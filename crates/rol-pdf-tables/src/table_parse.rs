use std::collections::HashMap;

use crate::model::Cell;

/// A cell candidate on a text line: character offset of its first glyph and
/// its trimmed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: usize,
    pub text: String,
}

impl Span {
    fn new(start: usize, text: &str) -> Self {
        Self {
            start,
            text: text.trim().to_string(),
        }
    }
}

/// Splits on tabs and on runs of two or more spaces, keeping each cell's
/// column offset in the untrimmed line.
pub(crate) fn split_line_into_spans(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut current_start = 0_usize;
    let mut whitespace_run = 0_usize;

    let flush = |current: &mut String, start: usize, spans: &mut Vec<Span>| {
        if !current.trim().is_empty() {
            spans.push(Span::new(start, current));
        }
        current.clear();
    };

    for (offset, ch) in line.chars().enumerate() {
        if ch == '\t' {
            flush(&mut current, current_start, &mut spans);
            whitespace_run = 0;
            continue;
        }

        if ch.is_whitespace() {
            whitespace_run += 1;
            if whitespace_run >= 2 {
                flush(&mut current, current_start, &mut spans);
            } else if !current.is_empty() {
                current.push(' ');
            }
            continue;
        }

        if current.is_empty() {
            current_start = offset;
        }
        whitespace_run = 0;
        current.push(ch);
    }

    flush(&mut current, current_start, &mut spans);
    spans
}

/// Splits on every whitespace run.
pub(crate) fn soft_split_line_into_spans(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut start = None;

    let chars = line.chars().collect::<Vec<_>>();
    for (offset, ch) in chars.iter().enumerate() {
        match (ch.is_whitespace(), start) {
            (false, None) => start = Some(offset),
            (true, Some(begin)) => {
                spans.push(Span::new(begin, &chars[begin..offset].iter().collect::<String>()));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(begin) = start {
        spans.push(Span::new(begin, &chars[begin..].iter().collect::<String>()));
    }

    spans
}

/// Maps a data line onto the header layout.
///
/// A line with as many cells as the header is taken positionally. Otherwise
/// every cell goes to the header column whose start offset is closest; cells
/// landing in the same column are joined with a space and columns nobody
/// lands in stay `Null`.
pub(crate) fn align_to_header(header: &[Span], row: &[Span]) -> Vec<Cell> {
    if header.is_empty() {
        return Vec::new();
    }

    if row.len() == header.len() {
        return row.iter().map(|span| Cell::from_raw(&span.text)).collect();
    }

    let mut columns: Vec<Option<String>> = vec![None; header.len()];
    for span in row {
        let target = header
            .iter()
            .enumerate()
            .min_by_key(|(_, anchor)| anchor.start.abs_diff(span.start))
            .map_or(0, |(index, _)| index);

        match &mut columns[target] {
            Some(existing) => {
                existing.push(' ');
                existing.push_str(&span.text);
            }
            slot @ None => *slot = Some(span.text.clone()),
        }
    }

    columns
        .into_iter()
        .map(|value| value.map_or(Cell::Null, |text| Cell::from_raw(&text)))
        .collect()
}

pub(crate) fn modal_width<T>(rows: &[Vec<T>]) -> usize {
    let mut freq = HashMap::new();
    for width in rows.iter().map(Vec::len) {
        *freq.entry(width).or_insert(0_usize) += 1;
    }

    freq.into_iter()
        .max_by_key(|(width, count)| (*count, *width))
        .map_or(0, |(width, _)| width)
}
