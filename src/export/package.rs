//! Compression of a finished session tree into `<root>.zip`.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::{Error, Result};
use crate::fs::archive_path_for;

/// Which packager to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackagingKind {
    /// In-process zip writer.
    #[default]
    Builtin,
    /// External `zip` utility.
    Command,
}

impl std::fmt::Display for PackagingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackagingKind::Builtin => write!(f, "builtin"),
            PackagingKind::Command => write!(f, "command"),
        }
    }
}

/// Compresses a session root directory.
///
/// The uncompressed tree is always left in place.
#[async_trait]
pub trait Packager: Send + Sync {
    /// Package `root` and return the archive path.
    async fn package(&self, root: &Path) -> Result<PathBuf>;
}

/// Build the configured packager.
pub fn packager_for(kind: PackagingKind, zip_command: &str) -> Box<dyn Packager> {
    match kind {
        PackagingKind::Builtin => Box::new(BuiltinZip),
        PackagingKind::Command => Box::new(ZipCommand::new(zip_command)),
    }
}

/// Writes the archive with the `zip` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinZip;

#[async_trait]
impl Packager for BuiltinZip {
    async fn package(&self, root: &Path) -> Result<PathBuf> {
        let root = root.to_path_buf();
        let archive = archive_path_for(&root);
        let target = archive.clone();

        tokio::task::spawn_blocking(move || write_zip(&root, &target))
            .await
            .map_err(|e| Error::Packaging(format!("Zip task failed: {}", e)))??;

        Ok(archive)
    }
}

/// Zip every file below `root`, with paths relative to `root`.
fn write_zip(root: &Path, archive: &Path) -> Result<()> {
    let file = File::create(archive)?;
    let mut zip = ZipWriter::new(file);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    add_dir(&mut zip, root, root, options)?;

    let mut file = zip.finish()?;
    file.flush()?;
    Ok(())
}

fn add_dir(
    zip: &mut ZipWriter<File>,
    root: &Path,
    dir: &Path,
    options: SimpleFileOptions,
) -> Result<()> {
    let mut entries = std::fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let name = zip_name(root, &path)?;

        if entry.file_type()?.is_dir() {
            zip.add_directory(format!("{}/", name), options)?;
            add_dir(zip, root, &path, options)?;
        } else {
            zip.start_file(name, options)?;
            let mut source = File::open(&path)?;
            io::copy(&mut source, zip)?;
        }
    }

    Ok(())
}

/// Forward-slash path of `path` relative to `root`.
fn zip_name(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|e| Error::Packaging(format!("{} outside session root: {}", path.display(), e)))?;

    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

/// Runs `zip -r <root>.zip .` inside the session root.
#[derive(Debug, Clone)]
pub struct ZipCommand {
    program: String,
}

impl ZipCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl Packager for ZipCommand {
    async fn package(&self, root: &Path) -> Result<PathBuf> {
        // The program runs inside `root`, so a relative archive path would land there.
        let archive = std::path::absolute(archive_path_for(root))?;

        tracing::debug!("Running {} -r {} .", self.program, archive.display());

        let output = Command::new(&self.program)
            .arg("-q")
            .arg("-r")
            .arg(&archive)
            .arg(".")
            .current_dir(root)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    Error::Packaging(format!("'{}' not found in PATH", self.program))
                } else {
                    Error::Packaging(format!("Failed to run {}: {}", self.program, e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Packaging(format!(
                "{} exited with {}: {}",
                self.program, output.status, stderr
            )));
        }

        Ok(archive)
    }
}
