//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::naming::{sanitize_filename, sanitize_path_component};

/// Name of the markdown file written into every post directory.
pub const POST_FILENAME: &str = "tweet.md";

/// An immutable location inside the session tree.
///
/// Nesting produces a new value; the parent is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivePath(PathBuf);

impl ArchivePath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Directory for a post id directly beneath this one.
    pub fn child(&self, id: &str) -> Result<ArchivePath> {
        Ok(Self(self.0.join(sanitize_filename(id)?)))
    }

    /// A file inside this directory.
    pub fn file(&self, name: &str) -> Result<PathBuf> {
        Ok(self.0.join(sanitize_filename(name)?))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

/// Session directory name: `<handle>_<session id>`.
pub fn session_dir_name(handle: &str, session_id: &str) -> Result<String> {
    sanitize_path_component(&format!("{}_{}", handle, session_id))
}

/// Session root directory beneath `output_dir`.
pub fn get_session_root(output_dir: &Path, handle: &str, session_id: &str) -> Result<PathBuf> {
    Ok(output_dir.join(session_dir_name(handle, session_id)?))
}

/// Archive file placed next to the session root: `<root>.zip`.
pub fn archive_path_for(root: &Path) -> PathBuf {
    let mut name = root.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".zip");
    root.with_file_name(name)
}

/// Ensure a directory exists, creating it if necessary.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}
