//! Export module: from bookmark pages to a packaged archive.
//!
//! This module provides:
//! - Cursor pagination over the bookmark list
//! - Aggregation of pages into a post/media/author index
//! - Per-post archive entries (markdown and media)
//! - One-level quoted-post resolution
//! - Packaging of the finished tree

pub mod aggregator;
pub mod archive;
pub mod package;
pub mod paginator;
pub mod pipeline;
pub mod resolver;
pub mod stats;

pub use aggregator::{collect_bookmarks, BookmarkIndex};
pub use archive::{build_entry, render_markdown, write_entry, ArchiveEntry, MediaFile};
pub use package::{packager_for, BuiltinZip, Packager, PackagingKind, ZipCommand};
pub use paginator::Paginator;
pub use pipeline::{export_bookmarks, ExportOptions, ExportSummary};
pub use resolver::resolve_quoted;
pub use stats::ExportStats;
