use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use url::Url;

use crate::error::PipelineError;
use crate::http::{HttpError, HttpSource};

/// Streams one response body into a temporary file next to `destination`
/// and renames it into place once the body has been read completely.
fn download_once(
    source: &dyn HttpSource,
    url: &Url,
    destination: &Path,
    chunk_size: usize,
) -> Result<u64, HttpError> {
    let directory = destination
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut partial = NamedTempFile::new_in(directory)?;

    let mut body = source.get_stream(url)?;
    let mut chunk = vec![0_u8; chunk_size];
    let mut written = 0_u64;
    loop {
        match body.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                partial.write_all(&chunk[..n])?;
                written += n as u64;
            }
            Err(error) if error.kind() == ErrorKind::Interrupted => {}
            Err(error) => return Err(HttpError::Io(error)),
        }
    }
    partial.flush()?;

    partial
        .persist(destination)
        .map_err(|error| HttpError::Io(error.error))?;
    Ok(written)
}

/// Downloads `url` to `destination`, trying up to `max_attempts` times with
/// no delay between attempts. Returns the number of bytes written.
///
/// A failed attempt never leaves a partial file at `destination`.
pub fn download_pdf(
    source: &dyn HttpSource,
    url: &Url,
    destination: &Path,
    max_attempts: u32,
    chunk_size: usize,
) -> Result<u64, PipelineError> {
    let max_attempts = max_attempts.max(1);
    let chunk_size = chunk_size.max(1);

    let mut attempt = 1;
    loop {
        match download_once(source, url, destination, chunk_size) {
            Ok(bytes) => {
                tracing::debug!(attempt, bytes, path = %destination.display(), "PDF saved");
                return Ok(bytes);
            }
            Err(last_error) if attempt >= max_attempts => {
                return Err(PipelineError::Download {
                    attempts: attempt,
                    source: last_error,
                });
            }
            Err(error) => {
                tracing::warn!(attempt, max_attempts, %error, "download attempt failed, retrying");
                attempt += 1;
            }
        }
    }
}
