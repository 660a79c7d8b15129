//! Folding bookmark pages into one index.

use std::collections::HashMap;

use crate::api::Session;
use crate::error::Result;
use crate::export::paginator::Paginator;
use crate::media::MediaItem;
use crate::model::{Author, BookmarkPage, EntityLookup, Post};

/// All posts, media, and authors of one export session.
///
/// Keys are last-write-wins. Posts keep the bookmark-order position of their
/// first occurrence.
#[derive(Debug, Default)]
pub struct BookmarkIndex {
    posts: Vec<Post>,
    post_positions: HashMap<String, usize>,
    media: HashMap<String, MediaItem>,
    authors: HashMap<String, Author>,
}

impl BookmarkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one page into the index.
    pub fn merge(&mut self, page: BookmarkPage) {
        for post in page.posts {
            match self.post_positions.get(&post.id) {
                Some(&pos) => self.posts[pos] = post,
                None => {
                    self.post_positions.insert(post.id.clone(), self.posts.len());
                    self.posts.push(post);
                }
            }
        }

        for item in page.media {
            self.media.insert(item.media_key.clone(), item);
        }

        for author in page.authors {
            self.authors.insert(author.id.clone(), author);
        }
    }

    /// Posts in bookmark order.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, id: &str) -> Option<&Post> {
        self.post_positions.get(id).map(|&pos| &self.posts[pos])
    }

    pub fn media_count(&self) -> usize {
        self.media.len()
    }

    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

impl EntityLookup for BookmarkIndex {
    fn author(&self, id: &str) -> Option<&Author> {
        self.authors.get(id)
    }

    fn media(&self, media_key: &str) -> Option<&MediaItem> {
        self.media.get(media_key)
    }
}

/// Drain a paginator into an index.
///
/// `on_page` is called with the running post count after each page.
pub async fn collect_bookmarks<S: Session + ?Sized>(
    mut paginator: Paginator<'_, S>,
    mut on_page: impl FnMut(usize),
) -> Result<BookmarkIndex> {
    let mut index = BookmarkIndex::new();
    let mut pages = 0usize;

    while let Some(page) = paginator.next_page().await? {
        index.merge(page);
        pages += 1;
        on_page(index.posts().len());
    }

    tracing::info!(
        "Collected {} bookmarks over {} pages ({} media, {} authors)",
        index.posts().len(),
        pages,
        index.media_count(),
        index.author_count()
    );

    Ok(index)
}
