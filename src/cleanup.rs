use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Removes the run's transient files when dropped: every file in the
/// download directory, the directory itself, then the intermediate CSV.
///
/// Failures are logged and otherwise ignored. The archive is never touched.
#[derive(Debug)]
pub struct CleanupGuard {
    download_dir: PathBuf,
    csv_path: PathBuf,
}

impl CleanupGuard {
    #[must_use]
    pub fn new(download_dir: PathBuf, csv_path: PathBuf) -> Self {
        Self {
            download_dir,
            csv_path,
        }
    }

    fn clean_download_dir(&self) {
        let entries = match fs::read_dir(&self.download_dir) {
            Ok(entries) => entries,
            Err(error) if error.kind() == ErrorKind::NotFound => return,
            Err(error) => {
                tracing::warn!(path = %self.download_dir.display(), %error, "cannot list download directory");
                return;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() {
                remove_file(&path);
            }
        }

        if let Err(error) = fs::remove_dir(&self.download_dir) {
            tracing::warn!(path = %self.download_dir.display(), %error, "failed to remove download directory");
        }
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        self.clean_download_dir();
        remove_file(&self.csv_path);
        tracing::debug!("temporary files cleaned up");
    }
}

fn remove_file(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "removed"),
        Err(error) if error.kind() == ErrorKind::NotFound => {}
        Err(error) => tracing::warn!(path = %path.display(), %error, "failed to remove file"),
    }
}
