//! Validation of identifiers used as path components.
//!
//! Post ids and media keys come straight from API responses and become
//! directory and file names, so they must never escape their parent.

use crate::error::{Error, Result};

/// How separators inside a name are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Separators {
    Reject,
    Replace,
}

/// Validate a file or directory name taken from an API identifier.
///
/// Traversal (`..`), separators and NUL are rejected; other characters that
/// are invalid on common filesystems become `_`.
pub fn sanitize_filename(name: &str) -> Result<String> {
    clean_component(name, Separators::Reject)
}

/// Like [`sanitize_filename`], but separators are replaced with `_`.
///
/// Used for account handles in the session directory name.
pub fn sanitize_path_component(name: &str) -> Result<String> {
    clean_component(name, Separators::Replace)
}

fn clean_component(name: &str, separators: Separators) -> Result<String> {
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed: '{}'",
            name
        )));
    }

    let has_separator = name.contains(['/', '\\']);
    if has_separator && separators == Separators::Reject {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if cleaned.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Name cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(cleaned)
}
