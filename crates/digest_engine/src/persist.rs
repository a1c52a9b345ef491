use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};
use thiserror::Error;

const STAGING_PREFIX: &str = ".digest-";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("{path}: {reason}")]
    OutputDir { path: PathBuf, reason: String },
    #[error("writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PersistError {
    fn output_dir(path: &Path, reason: impl ToString) -> Self {
        PersistError::OutputDir {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Checks that `dir` is an existing directory that accepts new files.
/// Missing directories are an error; they are never created.
pub fn check_output_dir(dir: &Path) -> Result<(), PersistError> {
    let meta = fs::metadata(dir).map_err(|e| PersistError::output_dir(dir, e))?;
    if !meta.is_dir() {
        return Err(PersistError::output_dir(dir, "not a directory"));
    }
    staging_file(dir).map_err(|e| PersistError::output_dir(dir, format!("not writable: {e}")))?;
    Ok(())
}

fn staging_file(dir: &Path) -> io::Result<NamedTempFile> {
    Builder::new()
        .prefix(STAGING_PREFIX)
        .suffix(".tmp")
        .tempfile_in(dir)
}

/// Writes whole files under one directory: content goes to a hidden staging
/// file that is renamed over the target, so readers never see a partial file.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        check_output_dir(&self.dir)?;
        let target = self.dir.join(filename);
        let io_err = |source: io::Error| PersistError::Io {
            path: target.clone(),
            source,
        };

        let mut staged = staging_file(&self.dir).map_err(io_err)?;
        staged.write_all(content.as_bytes()).map_err(io_err)?;
        staged.as_file().sync_all().map_err(io_err)?;
        staged.persist(&target).map_err(|e| io_err(e.error))?;
        Ok(target)
    }
}
