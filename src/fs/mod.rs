//! Filesystem module.
//!
//! Provides:
//! - Session and post directory layout
//! - Filename sanitization

pub mod naming;
pub mod paths;

pub use naming::{sanitize_filename, sanitize_path_component};
pub use paths::{archive_path_for, ensure_dir, get_session_root, ArchivePath, POST_FILENAME};
