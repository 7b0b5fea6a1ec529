use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use regex::Regex;

use crate::error::PipelineError;

pub const DEFAULT_PAGE_URL: &str = "https://www.gov.br/ans/pt-br/acesso-a-informacao/participacao-da-sociedade/atualizacao-do-rol-de-procedimentos";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const MAX_DOWNLOAD_ATTEMPTS: u32 = 3;
pub const DOWNLOAD_CHUNK_SIZE: usize = 8192;
pub const DOWNLOAD_DIR: &str = "temp_pdfs";
pub const OUTPUT_DIR: &str = "output";
pub const CSV_FILENAME: &str = "lista_de_procedimentos.csv";
pub const ZIP_FILENAME: &str = "Teste_Lucas_Gaspari.zip";
/// Annex I PDF names: `Anexo I...pdf`, `Anexo_I_...pdf`, `ANEXO-I...PDF`.
pub const ANNEX_LINK_PATTERN: &str = r"(?i)Anexo[ _-]*I.*\.pdf$";

/// Abbreviation → label replacements applied to the columns named after
/// each abbreviation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Legend {
    entries: BTreeMap<String, String>,
}

impl Legend {
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Label for `value` when it is one of the abbreviations.
    #[must_use]
    pub fn expand(&self, value: &str) -> Option<&str> {
        self.entries.get(value).map(String::as_str)
    }

    /// Column names the legend applies to.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for Legend {
    fn default() -> Self {
        Self::new([("OD", "Seg. Odontológica"), ("AMB", "Seg. Ambulatorial")])
    }
}

/// Everything a run needs. `Config::default()` is what the binary uses.
#[derive(Debug, Clone)]
pub struct Config {
    pub page_url: String,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub max_attempts: u32,
    pub chunk_size: usize,
    pub download_dir: PathBuf,
    pub output_dir: PathBuf,
    pub csv_filename: String,
    pub zip_filename: String,
    pub link_pattern: Regex,
    pub legend: Legend,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_url: DEFAULT_PAGE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            request_timeout: REQUEST_TIMEOUT,
            max_attempts: MAX_DOWNLOAD_ATTEMPTS,
            chunk_size: DOWNLOAD_CHUNK_SIZE,
            download_dir: PathBuf::from(DOWNLOAD_DIR),
            output_dir: PathBuf::from(OUTPUT_DIR),
            csv_filename: CSV_FILENAME.to_string(),
            zip_filename: ZIP_FILENAME.to_string(),
            link_pattern: Regex::new(ANNEX_LINK_PATTERN).expect("hardcoded annex link regex is valid"),
            legend: Legend::default(),
        }
    }
}

impl Config {
    /// Same settings with every directory rooted at `base`.
    #[must_use]
    pub fn rooted_at(mut self, base: &std::path::Path) -> Self {
        self.download_dir = base.join(&self.download_dir);
        self.output_dir = base.join(&self.output_dir);
        self
    }

    #[must_use]
    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(&self.csv_filename)
    }

    #[must_use]
    pub fn archive_path(&self) -> PathBuf {
        self.output_dir.join(&self.zip_filename)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.max_attempts == 0 {
            return Err(PipelineError::Config(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(PipelineError::Config(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.csv_filename == self.zip_filename {
            return Err(PipelineError::Config(
                "csv and archive filenames must differ".to_string(),
            ));
        }
        Ok(())
    }
}
