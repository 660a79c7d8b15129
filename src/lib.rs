//! Bookmark Exporter - export saved X/Twitter posts into a local archive.
//!
//! Every bookmarked post becomes a directory holding a `tweet.md` (YAML front
//! matter with author metadata, then the post text with short links
//! resolved) and its media. Quoted posts are nested one level below the post
//! that quotes them, and the finished tree is zipped next to itself.
//!
//! # Features
//!
//! - Cursor pagination over the full bookmark list
//! - Short-link normalization for post text and author descriptions
//! - Highest bit-rate selection for video variants
//! - One-level quoted-post resolution
//! - Built-in or external zip packaging
//! - OAuth2 PKCE login from the command line
//!
//! # Example
//!
//! ```no_run
//! use bookmark_exporter::{export_bookmarks, BuiltinZip, ExportOptions, XApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = XApi::new("access-token".into(), bookmark_exporter::api::API_BASE)?;
//!     let options = ExportOptions {
//!         output_directory: std::env::temp_dir(),
//!         show_progress: false,
//!     };
//!
//!     let summary = export_bookmarks(&api, &BuiltinZip, &options).await?;
//!     println!("{}", summary.archive.display());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod fs;
pub mod media;
pub mod model;
pub mod output;
pub mod text;

// Re-exports for convenience
pub use api::{Session, XApi};
pub use config::Config;
pub use error::{Error, Result};
pub use export::{export_bookmarks, BuiltinZip, ExportOptions, ExportSummary, ZipCommand};
pub use media::{MediaItem, MediaSource};
pub use model::{Author, BookmarkPage, Post};
