use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::error::PipelineError;
use crate::http::HttpSource;

const FALLBACK_PDF_FILENAME: &str = "anexo_i.pdf";

/// Fetches `page_url` and parses it as an HTML document.
pub fn fetch_page(source: &dyn HttpSource, page_url: &Url) -> Result<Html, PipelineError> {
    let html = source.get_text(page_url).map_err(PipelineError::Fetch)?;
    Ok(Html::parse_document(&html))
}

/// Every anchor whose raw `href` matches `pattern`, resolved against
/// `base_url`, in document order. Hrefs that cannot be joined are skipped.
pub fn annex_links(document: &Html, base_url: &Url, pattern: &Regex) -> Vec<Url> {
    let anchors = Selector::parse("a[href]").expect("hardcoded anchor selector is valid");

    document
        .select(&anchors)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| pattern.is_match(href))
        .filter_map(|href| base_url.join(href.trim()).ok())
        .collect()
}

/// The first matching anchor in document order, as an absolute URL.
pub fn resolve_pdf_link(
    document: &Html,
    base_url: &Url,
    pattern: &Regex,
) -> Result<Url, PipelineError> {
    let links = annex_links(document, base_url, pattern);
    if links.len() > 1 {
        tracing::debug!(candidates = links.len(), "several annex links; using the first");
    }
    links.into_iter().next().ok_or(PipelineError::NoLinkFound)
}

/// Percent-decoded last path segment of `url`, used as the local file name.
pub fn pdf_filename(url: &Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();
    let decoded = urlencoding::decode(segment)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| segment.to_string());

    // A decoded `/` would escape the download directory.
    let name = decoded.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    if name.is_empty() {
        FALLBACK_PDF_FILENAME.to_string()
    } else {
        name.to_string()
    }
}
