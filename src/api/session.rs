//! The authenticated session the export pipeline drives.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{BookmarkPage, PostExpansion, UserIdentity};

/// A downloaded media body with its declared content type.
#[derive(Debug, Clone)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Operations the exporter needs from an authenticated session.
///
/// Every error is fatal to the export run.
#[async_trait]
pub trait Session: Send + Sync {
    /// Identity of the authenticated user.
    async fn me(&self) -> Result<UserIdentity>;

    /// One page of `user_id`'s bookmarks, starting at `cursor`.
    async fn bookmarks_page(&self, user_id: &str, cursor: Option<&str>) -> Result<BookmarkPage>;

    /// A single post with its media and author expansions.
    ///
    /// `None` when the response carries no post (deleted or protected).
    async fn post(&self, post_id: &str) -> Result<Option<PostExpansion>>;

    /// Fetch a media URL.
    async fn download(&self, url: &str) -> Result<Download>;
}
