//! The end-to-end export run.

use std::path::{Path, PathBuf};

use crate::api::Session;
use crate::error::{Error, Result};
use crate::export::aggregator::{collect_bookmarks, BookmarkIndex};
use crate::export::archive::{build_entry, write_entry};
use crate::export::package::Packager;
use crate::export::paginator::Paginator;
use crate::export::resolver::resolve_quoted;
use crate::export::stats::ExportStats;
use crate::fs::{ensure_dir, get_session_root, ArchivePath};
use crate::model::EntityLookup;
use crate::output::{create_item_bar, create_spinner};

/// Options for one export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory the session root is created in.
    pub output_directory: PathBuf,
    pub show_progress: bool,
}

/// Result of a successful export run.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub handle: String,
    pub session_root: PathBuf,
    pub archive: PathBuf,
    pub stats: ExportStats,
}

/// Export the authenticated user's bookmarks into `<handle>_<uuid>.zip`.
///
/// Posts are archived strictly in bookmark order, each with its quoted posts,
/// before the next one starts. Any error aborts the run and leaves what was
/// written so far on disk.
pub async fn export_bookmarks<S: Session + ?Sized>(
    session: &S,
    packager: &dyn Packager,
    options: &ExportOptions,
) -> Result<ExportSummary> {
    let me = session.me().await?;
    tracing::info!("Exporting bookmarks of @{} ({})", me.handle, me.id);

    let index = fetch_index(session, &me.id, options.show_progress).await?;

    let session_id = uuid::Uuid::new_v4().to_string();
    let root = get_session_root(&options.output_directory, &me.handle, &session_id)?;
    ensure_dir(&root).await?;
    tracing::info!("Writing archive tree to {}", root.display());

    let stats = write_tree(session, &index, &root, options.show_progress).await?;

    let archive = packager.package(&root).await?;
    tracing::info!("Archive written to {}", archive.display());

    Ok(ExportSummary {
        handle: me.handle,
        session_root: root,
        archive,
        stats,
    })
}

async fn fetch_index<S: Session + ?Sized>(
    session: &S,
    user_id: &str,
    show_progress: bool,
) -> Result<BookmarkIndex> {
    let spinner = show_progress.then(|| create_spinner("Fetching bookmarks..."));

    let result = collect_bookmarks(Paginator::new(session, user_id), |count| {
        if let Some(spinner) = &spinner {
            spinner.set_message(format!("Fetched {} bookmarks", count));
        }
    })
    .await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    result
}

/// Write every bookmark (and its quoted posts) beneath `root`.
async fn write_tree<S: Session + ?Sized>(
    session: &S,
    index: &BookmarkIndex,
    root: &Path,
    show_progress: bool,
) -> Result<ExportStats> {
    let root = ArchivePath::new(root);
    let mut stats = ExportStats::new();

    let bar = show_progress.then(|| create_item_bar(index.posts().len() as u64, "Archiving"));

    for post in index.posts() {
        let author = index
            .author(&post.author_id)
            .ok_or_else(|| Error::MissingAuthor {
                post_id: post.id.clone(),
                author_id: post.author_id.clone(),
            })?;

        let dir = root.child(&post.id)?;
        let entry = build_entry(post, author, index, dir.clone())?;
        write_entry(session, &entry, &mut stats).await?;
        stats.increment_bookmark();

        resolve_quoted(session, post, &dir, &mut stats).await?;

        if let Some(bar) = &bar {
            bar.inc(1);
        }
    }

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    Ok(stats)
}
