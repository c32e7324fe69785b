//! Owned temporary storage for a single pipeline run
//!
//! `ScratchDir` holds intermediate files and is removed when the run ends.
//! `StagedOutput` is a temporary file next to a final output path; it only
//! replaces the destination on `commit`, so an aborted run never leaves a
//! half-written output behind.

use std::io;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, TempPath};
use thiserror::Error;

/// Non-fatal failure to remove temporary files
#[derive(Error, Debug)]
#[error("failed to remove temporary directory '{}': {source}", .path.display())]
pub struct CleanupWarning {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Temporary directory exclusively owned by one pipeline invocation
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Create a fresh directory under the system temp location
    pub fn create(prefix: &str) -> io::Result<Self> {
        Self::create_in(&std::env::temp_dir(), prefix)
    }

    /// Create a fresh directory under `parent`, which must exist
    pub fn create_in(parent: &Path, prefix: &str) -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix(prefix).tempdir_in(parent)?;
        tracing::debug!(path = %dir.path().display(), "created scratch directory");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path for a named file inside the directory
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Remove the directory and everything in it
    ///
    /// Dropping a `ScratchDir` also removes it, silently; `close` is the
    /// path that reports failures.
    pub fn close(self) -> Result<(), CleanupWarning> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .map_err(|source| CleanupWarning { path: path.clone(), source })?;
        tracing::debug!(path = %path.display(), "removed scratch directory");
        Ok(())
    }
}

/// Temporary file that becomes `target` on commit
#[derive(Debug)]
pub struct StagedOutput {
    temp: TempPath,
    target: PathBuf,
}

impl StagedOutput {
    /// Reserve a temporary file in the target's directory
    ///
    /// The temporary name keeps the target's extension so tools that pick a
    /// container from the file name behave the same as for the target.
    pub fn new(target: &Path) -> io::Result<Self> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let suffix = target
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let temp = tempfile::Builder::new()
            .prefix(".partial-")
            .suffix(&suffix)
            .tempfile_in(dir)?
            .into_temp_path();

        Ok(Self {
            temp,
            target: target.to_path_buf(),
        })
    }

    /// Where the content should be written
    pub fn path(&self) -> &Path {
        &self.temp
    }

    /// Move the staged file onto the target, replacing any existing file
    pub fn commit(self) -> io::Result<PathBuf> {
        self.temp.persist(&self.target).map_err(|e| e.error)?;
        Ok(self.target)
    }
}
