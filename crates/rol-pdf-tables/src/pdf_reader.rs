use std::collections::BTreeMap;
use std::path::Path;

use encoding_rs::{UTF_16BE, WINDOWS_1252};
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};

use crate::error::ExtractError;
use crate::model::PageText;
use crate::options::PageSelection;
use crate::table_parse::split_line_into_spans;

/// Text recovered from a PDF, per page plus the whole-document extraction
/// when `pdf-extract` could read it.
#[derive(Debug, Clone, Default)]
pub(crate) struct PdfText {
    pub pages: Vec<PageText>,
    pub full_text: Option<String>,
}

fn split_text_into_pages(raw_text: &str) -> Vec<String> {
    let mut pages = raw_text
        .split('\u{000C}')
        .map(str::to_string)
        .collect::<Vec<_>>();
    if pages.last().is_some_and(String::is_empty) {
        pages.pop();
    }
    pages
}

fn looks_decoding_broken(text: &str) -> bool {
    if text.contains("?Identity-H Unimplemented?") {
        return true;
    }

    let total = text.chars().count();
    if total == 0 {
        return false;
    }

    let replacement = text.matches('\u{FFFD}').count();
    let control = text
        .chars()
        .filter(|ch| ch.is_control() && !matches!(ch, '\n' | '\r' | '\t'))
        .count();

    replacement * 8 > total || control * 5 > total
}

fn decode_utf16(bytes: &[u8]) -> Option<String> {
    let (utf16, had_errors) = UTF_16BE.decode_without_bom_handling(bytes);
    (!had_errors && !utf16.is_empty()).then(|| utf16.into_owned())
}

fn decode_pdf_bytes(encoding: Option<&str>, bytes: &[u8]) -> String {
    if let Some(text) = bytes.strip_prefix(&[0xFE, 0xFF]).and_then(decode_utf16) {
        return text;
    }

    let decoded = Document::decode_text(encoding, bytes);
    if !looks_decoding_broken(&decoded) {
        return decoded;
    }

    let unicode_hint = encoding.is_some_and(|name| {
        let lower = name.to_ascii_lowercase();
        lower.contains("utf16") || lower.contains("identity-h") || lower.contains("unicode")
    });
    if let Some(text) = unicode_hint.then(|| decode_utf16(bytes)).flatten() {
        return text;
    }

    // Portuguese documents without a usable encoding entry are almost always
    // WinAnsi.
    let (latin, _, _) = WINDOWS_1252.decode(bytes);
    latin.into_owned()
}

/// Higher is more table-like: many multi-cell lines, no decoding damage.
fn extraction_quality_score(text: &str) -> i64 {
    if text.trim().is_empty() {
        return i64::MIN / 4;
    }

    let mut non_empty_lines = 0_i64;
    let mut multi_cell_lines = 0_i64;
    let mut aligned_lines = 0_i64;
    let mut previous_width = 0_usize;

    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        non_empty_lines += 1;

        let width = split_line_into_spans(line).len();
        if width >= 2 {
            multi_cell_lines += 1;
            if width == previous_width {
                aligned_lines += 1;
            }
        }
        previous_width = width;
    }

    let broken_penalty = if looks_decoding_broken(text) { 800 } else { 0 };
    multi_cell_lines * 50 + aligned_lines * 10 + non_empty_lines - broken_penalty
}

fn extract_text_from_page_content(document: &Document, page_id: ObjectId) -> Option<String> {
    fn collect_text(text: &mut String, encoding: Option<&str>, operands: &[Object]) {
        for operand in operands {
            match operand {
                Object::String(bytes, _) => text.push_str(&decode_pdf_bytes(encoding, bytes)),
                Object::Array(items) => collect_text(text, encoding, items),
                // Large negative kerning in TJ arrays is how many producers
                // draw the gap between columns.
                Object::Integer(value) if *value < -100 => text.push_str("  "),
                Object::Real(value) if *value < -100.0 => text.push_str("  "),
                _ => {}
            }
        }
    }

    let raw_content = document.get_page_content(page_id).ok()?;
    let content = Content::decode(&raw_content).ok()?;
    let encodings = document
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect::<BTreeMap<Vec<u8>, &str>>();

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_encoding = None;
    for operation in content.operations {
        match operation.operator.as_str() {
            "Tf" => {
                current_encoding = operation
                    .operands
                    .first()
                    .and_then(|operand| operand.as_name().ok())
                    .and_then(|font_name| encodings.get(font_name).copied());
            }
            "Tj" | "TJ" | "'" | "\"" => {
                collect_text(&mut current, current_encoding, &operation.operands);
            }
            "T*" | "Td" | "TD" | "ET" => {
                if !current.trim().is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current.clear();
            }
            _ => {}
        }
    }

    if !current.trim().is_empty() {
        lines.push(current);
    }

    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn read_document_pages(
    document: &Document,
    extracted: Option<String>,
    selection: Option<&PageSelection>,
) -> Result<PdfText, ExtractError> {
    let pages_map = document.get_pages();

    let per_page = extracted
        .as_deref()
        .map(split_text_into_pages)
        .filter(|pages| pages.len() == pages_map.len());

    let mut pages = Vec::new();
    for (index, (page_no, page_id)) in pages_map.iter().enumerate() {
        if selection.is_some_and(|selection| !selection.contains(*page_no)) {
            continue;
        }

        let mut candidates = Vec::new();
        if let Some(text) = per_page
            .as_ref()
            .and_then(|pages| pages.get(index))
            .filter(|text| !text.trim().is_empty())
        {
            candidates.push(text.clone());
        }
        if let Some(text) = extract_text_from_page_content(document, *page_id) {
            candidates.push(text);
        }
        if let Some(text) = document
            .extract_text(&[*page_no])
            .ok()
            .filter(|text| !text.trim().is_empty())
        {
            candidates.push(text);
        }

        let text = candidates
            .into_iter()
            .max_by_key(|text| extraction_quality_score(text))
            .unwrap_or_default();
        tracing::debug!(page = page_no, chars = text.len(), "page text selected");

        pages.push(PageText {
            page_number: *page_no,
            text,
        });
    }

    if pages.is_empty() {
        return Err(ExtractError::NoPagesSelected);
    }

    Ok(PdfText {
        pages,
        full_text: extracted.filter(|text| !text.trim().is_empty()),
    })
}

pub(crate) fn read_pdf_pages(
    input_pdf: &Path,
    selection: Option<&PageSelection>,
) -> Result<PdfText, ExtractError> {
    let document = Document::load(input_pdf)?;
    let extracted = pdf_extract::extract_text(input_pdf).ok();
    read_document_pages(&document, extracted, selection)
}

pub(crate) fn read_pdf_pages_from_bytes(
    input_pdf: &[u8],
    selection: Option<&PageSelection>,
) -> Result<PdfText, ExtractError> {
    let document = Document::load_mem(input_pdf)?;
    let extracted = pdf_extract::extract_text_from_mem(input_pdf).ok();
    read_document_pages(&document, extracted, selection)
}
