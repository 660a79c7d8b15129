//! Response-level containers handed from the API layer to the pipeline.

use crate::media::MediaItem;
use crate::model::post::{Author, Post};

/// The authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: String,
    pub handle: String,
}

/// One page of the bookmark list with its side-tables.
#[derive(Debug, Clone, Default)]
pub struct BookmarkPage {
    pub posts: Vec<Post>,
    pub media: Vec<MediaItem>,
    pub authors: Vec<Author>,
    /// Cursor for the following page; `None` on the last page.
    pub next_cursor: Option<String>,
}

/// A single post fetched by id, with its expansions.
#[derive(Debug, Clone)]
pub struct PostExpansion {
    pub post: Post,
    pub media: Vec<MediaItem>,
    pub authors: Vec<Author>,
}

/// Read access to authors and media by key.
pub trait EntityLookup {
    fn author(&self, id: &str) -> Option<&Author>;
    fn media(&self, media_key: &str) -> Option<&MediaItem>;
}

impl EntityLookup for PostExpansion {
    fn author(&self, id: &str) -> Option<&Author> {
        self.authors.iter().find(|a| a.id == id)
    }

    fn media(&self, media_key: &str) -> Option<&MediaItem> {
        self.media.iter().find(|m| m.media_key == media_key)
    }
}
