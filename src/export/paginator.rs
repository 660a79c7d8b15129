//! Cursor-driven retrieval of the bookmark list.

use futures::stream::{self, Stream};

use crate::api::Session;
use crate::error::Result;
use crate::model::BookmarkPage;

/// Where the paginator is in the bookmark list.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Position {
    Start,
    After(String),
    Exhausted,
}

/// Finite, non-restartable sequence of bookmark pages.
///
/// The page whose next cursor is absent is still yielded; after it the
/// paginator reports exhaustion forever.
pub struct Paginator<'a, S: Session + ?Sized> {
    session: &'a S,
    user_id: String,
    position: Position,
}

impl<'a, S: Session + ?Sized> Paginator<'a, S> {
    pub fn new(session: &'a S, user_id: impl Into<String>) -> Self {
        Self {
            session,
            user_id: user_id.into(),
            position: Position::Start,
        }
    }

    /// Fetch the next page, or `None` once the list is exhausted.
    ///
    /// An error leaves the paginator exhausted.
    pub async fn next_page(&mut self) -> Result<Option<BookmarkPage>> {
        let cursor = match &self.position {
            Position::Start => None,
            Position::After(cursor) => Some(cursor.as_str()),
            Position::Exhausted => return Ok(None),
        };

        let result = self.session.bookmarks_page(&self.user_id, cursor).await;

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                self.position = Position::Exhausted;
                return Err(e);
            }
        };

        tracing::debug!(
            "Fetched bookmark page with {} posts (next cursor: {:?})",
            page.posts.len(),
            page.next_cursor
        );

        self.position = match &page.next_cursor {
            Some(next) => Position::After(next.clone()),
            None => Position::Exhausted,
        };

        Ok(Some(page))
    }

    /// Whether the final page has already been yielded.
    pub fn is_exhausted(&self) -> bool {
        self.position == Position::Exhausted
    }

    /// Adapt into a `Stream` of pages.
    pub fn into_stream(self) -> impl Stream<Item = Result<BookmarkPage>> + 'a
    where
        S: 'a,
    {
        stream::unfold(self, |mut paginator| async move {
            match paginator.next_page().await {
                Ok(Some(page)) => Some((Ok(page), paginator)),
                Ok(None) => None,
                Err(e) => Some((Err(e), paginator)),
            }
        })
    }
}
