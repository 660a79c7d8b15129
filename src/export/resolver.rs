//! Quoted-post resolution, one level deep.

use crate::api::Session;
use crate::error::{Error, Result};
use crate::export::archive::{build_entry, write_entry};
use crate::export::stats::ExportStats;
use crate::fs::ArchivePath;
use crate::model::{EntityLookup, Post};

/// Fetch and archive every post quoted by `post` beneath `parent`.
///
/// Only `quoted` references are followed, and a quoted post's own references
/// are not expanded. Returns the number of quoted posts written.
pub async fn resolve_quoted<S: Session + ?Sized>(
    session: &S,
    post: &Post,
    parent: &ArchivePath,
    stats: &mut ExportStats,
) -> Result<usize> {
    let mut written = 0;

    for quoted_id in post.quoted_ids() {
        tracing::debug!("Post {} quotes {}", post.id, quoted_id);

        let expansion = session
            .post(quoted_id)
            .await?
            .ok_or_else(|| Error::MalformedReference {
                post_id: quoted_id.to_string(),
                reason: format!("quoted by {} but absent from the response", post.id),
            })?;

        let quoted = &expansion.post;
        let author = expansion.author(&quoted.author_id).ok_or_else(|| {
            Error::MalformedReference {
                post_id: quoted_id.to_string(),
                reason: format!("author {} absent from the response", quoted.author_id),
            }
        })?;

        let entry = build_entry(quoted, author, &expansion, parent.child(quoted_id)?)?;
        write_entry(session, &entry, stats).await?;

        stats.increment_quoted();
        written += 1;
    }

    Ok(written)
}
