//! Scratch storage for uploaded files.
//!
//! Each upload gets its own temporary directory holding `temp_<filename>`.
//! The directory is removed when the guard is dropped, so every exit path of
//! the upload handler releases it.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

const FALLBACK_NAME: &str = "upload.pdf";

pub struct ScratchUpload {
    dir: TempDir,
    path: PathBuf,
}

impl ScratchUpload {
    /// Writes `bytes` to `<root>/<fresh dir>/temp_<basename of filename>`.
    pub async fn write(root: &Path, filename: &str, bytes: &[u8]) -> io::Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("resume-upload-")
            .tempdir_in(root)?;
        let path = dir.path().join(scratch_name(filename));
        tokio::fs::write(&path, bytes).await?;
        Ok(Self { dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the scratch directory, reporting failures instead of
    /// swallowing them as `Drop` does.
    pub fn close(self) -> io::Result<()> {
        self.dir.close()
    }
}

/// `temp_<name>` where `<name>` is the last path component of the client
/// supplied filename.
pub fn scratch_name(filename: &str) -> String {
    let base = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(FALLBACK_NAME);
    format!("temp_{base}")
}
