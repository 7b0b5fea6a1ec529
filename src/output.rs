use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use rol_pdf_tables::TabularDataset;
use tempfile::NamedTempFile;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::config::Config;
use crate::error::PipelineError;

/// Writes the dataset CSV into the output directory and packages it into the
/// configured archive. Returns the archive path.
pub fn write_outputs(dataset: &TabularDataset, config: &Config) -> Result<PathBuf, PipelineError> {
    fs::create_dir_all(&config.output_dir)?;

    let csv_path = config.csv_path();
    rol_pdf_tables::write_csv(&csv_path, dataset)?;
    tracing::debug!(rows = dataset.len(), path = %csv_path.display(), "CSV written");

    let archive_path = config.archive_path();
    zip_single_file(&csv_path, &archive_path)?;
    tracing::debug!(path = %archive_path.display(), "archive written");
    Ok(archive_path)
}

/// Packs `source` into a deflated ZIP at `archive_path` with a single entry
/// named by the file's base name. The archive only appears once complete.
pub fn zip_single_file(source: &Path, archive_path: &Path) -> Result<(), PipelineError> {
    let entry_name = source
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} has no usable file name", source.display()),
            )
        })?;

    let directory = archive_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let partial = NamedTempFile::new_in(directory)?;

    let mut writer = ZipWriter::new(partial);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    writer.start_file(entry_name, options)?;
    io::copy(&mut BufReader::new(File::open(source)?), &mut writer)?;
    let mut partial = writer.finish()?;
    partial.flush()?;

    partial.persist(archive_path)?;
    Ok(())
}
