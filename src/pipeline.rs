use std::fs;
use std::path::PathBuf;

use rol_pdf_tables::ExtractOptions;
use url::Url;

use crate::cleanup::CleanupGuard;
use crate::config::Config;
use crate::download::download_pdf;
use crate::error::PipelineError;
use crate::http::{BlockingClient, HttpSource};
use crate::normalize::normalize;
use crate::output::write_outputs;
use crate::source_scraper::{fetch_page, pdf_filename, resolve_pdf_link};

/// Builds the network client described by `config`.
pub fn http_client(config: &Config) -> Result<BlockingClient, PipelineError> {
    BlockingClient::new(&config.user_agent, config.request_timeout)
        .map_err(|error| PipelineError::Config(error.to_string()))
}

/// Runs fetch, resolve, download, extract, normalize and write in order and
/// returns the archive path. Transient files are removed on every exit path.
pub fn run(config: &Config, source: &dyn HttpSource) -> Result<PathBuf, PipelineError> {
    config.validate()?;
    let page_url = Url::parse(&config.page_url)
        .map_err(|error| PipelineError::Config(format!("invalid page url: {error}")))?;

    let _cleanup = CleanupGuard::new(config.download_dir.clone(), config.csv_path());
    fs::create_dir_all(&config.download_dir)?;
    fs::create_dir_all(&config.output_dir)?;

    tracing::info!("Fetching page content...");
    let document = fetch_page(source, &page_url)?;
    let pdf_url = resolve_pdf_link(&document, &page_url, &config.link_pattern)?;

    let filename = pdf_filename(&pdf_url);
    tracing::info!("Downloading PDF: {filename}");
    let pdf_path = config.download_dir.join(&filename);
    download_pdf(
        source,
        &pdf_url,
        &pdf_path,
        config.max_attempts,
        config.chunk_size,
    )?;

    tracing::info!("Extracting tables from PDF...");
    let (mut dataset, report) =
        rol_pdf_tables::extract_tables(&pdf_path, &ExtractOptions::default())?;
    for warning in &report.warnings {
        tracing::debug!(%warning, "extraction warning");
    }
    tracing::debug!(
        tables = report.table_count,
        discarded = report.discarded_tables,
        rows = report.row_count,
        "tables extracted"
    );

    tracing::info!("Processing data...");
    normalize(&mut dataset, &config.legend);

    tracing::info!("Saving and compressing results...");
    write_outputs(&dataset, config)
}

#[cfg(test)]
mod tests {
    use super::http_client;
    use crate::config::Config;

    #[test]
    fn unusable_user_agent_is_a_config_error() {
        let config = Config {
            user_agent: "rol\nprocedimentos".to_string(),
            ..Config::default()
        };

        let error = http_client(&config).expect_err("header value is invalid");

        assert_eq!(error.kind(), "invalid_config");
        assert!(
            error.to_string().contains("failed to build HTTP client"),
            "{error}"
        );
    }
}
