//! Per-post archive entries: markdown rendering and media files.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::api::Session;
use crate::error::Result;
use crate::export::stats::ExportStats;
use crate::fs::{ensure_dir, ArchivePath, POST_FILENAME};
use crate::media::{media_extension, select_media};
use crate::model::{Author, EntityLookup, Post};
use crate::text::{normalize_links, NormalizeMode};

/// Separator between front matter and body.
const FRONT_MATTER_END: &str = "---\n";

/// Front matter of `tweet.md`. Field order is the output order.
#[derive(Debug, Serialize)]
pub struct FrontMatter {
    pub original_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub author: AuthorMeta,
}

#[derive(Debug, Serialize)]
pub struct AuthorMeta {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A media attachment scheduled for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub media_key: String,
    pub url: String,
    /// Content type declared for the chosen variant.
    pub content_type: Option<String>,
}

/// Everything needed to write one post directory.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub dir: ArchivePath,
    pub markdown: String,
    pub media: Vec<MediaFile>,
    /// Attachments that produce no file.
    pub skipped_media: usize,
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Render `tweet.md`: YAML front matter, `---`, normalized body.
pub fn render_markdown(post: &Post, author: &Author) -> Result<String> {
    let description = author.description.as_deref().map(|d| {
        normalize_links(d, &author.description_entities, NormalizeMode::AuthorDescription)
    });

    let front = FrontMatter {
        original_url: author.post_url(&post.id),
        created_at: post.created_at.as_ref().map(format_timestamp),
        author: AuthorMeta {
            name: author.name.clone(),
            url: author.profile_url(),
            description,
        },
    };

    let body = normalize_links(&post.text, &post.entities, NormalizeMode::PostBody);

    let mut out = serde_yaml::to_string(&front)?;
    out.push_str(FRONT_MATTER_END);
    out.push_str(&body);
    Ok(out)
}

/// Build the archive entry for `post` inside `dir`.
pub fn build_entry(
    post: &Post,
    author: &Author,
    lookup: &impl EntityLookup,
    dir: ArchivePath,
) -> Result<ArchiveEntry> {
    let markdown = render_markdown(post, author)?;

    let mut media = Vec::new();
    let mut skipped_media = 0;

    for key in &post.media_keys {
        let Some(item) = lookup.media(key) else {
            tracing::warn!("Post {}: media {} missing from expansions", post.id, key);
            skipped_media += 1;
            continue;
        };

        match select_media(item) {
            Some(selected) => media.push(MediaFile {
                media_key: item.media_key.clone(),
                url: selected.url.to_string(),
                content_type: selected.content_type.map(String::from),
            }),
            None => {
                tracing::debug!("Post {}: no downloadable variant for {}", post.id, key);
                skipped_media += 1;
            }
        }
    }

    Ok(ArchiveEntry {
        dir,
        markdown,
        media,
        skipped_media,
    })
}

/// Create the entry's directory and write its markdown and media files.
pub async fn write_entry<S: Session + ?Sized>(
    session: &S,
    entry: &ArchiveEntry,
    stats: &mut ExportStats,
) -> Result<()> {
    ensure_dir(entry.dir.as_path()).await?;

    let markdown_path = entry.dir.file(POST_FILENAME)?;
    tokio::fs::write(&markdown_path, &entry.markdown).await?;
    stats.add_markdown(entry.markdown.len());

    for file in &entry.media {
        let download = session.download(&file.url).await?;
        let ext = media_extension(
            download.content_type.as_deref(),
            file.content_type.as_deref(),
            &file.url,
        );
        let path = entry.dir.file(&format!("{}.{}", file.media_key, ext))?;

        tokio::fs::write(&path, &download.bytes).await?;
        stats.add_media_file(download.bytes.len());
        tracing::debug!("Wrote {}", path.display());
    }

    for _ in 0..entry.skipped_media {
        stats.increment_skipped();
    }

    Ok(())
}
