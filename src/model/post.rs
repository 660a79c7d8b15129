//! Posts, authors, and the link entities embedded in their text.

use chrono::{DateTime, Utc};

/// Profile URL prefix used for original links in the archive.
pub const PROFILE_BASE: &str = "https://twitter.com";

/// A bookmarked (or quoted) post.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub text: String,
    pub entities: Vec<LinkEntity>,
    pub media_keys: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub references: Vec<Reference>,
}

impl Post {
    /// Iterate over the identifiers of posts this one quotes.
    pub fn quoted_ids(&self) -> impl Iterator<Item = &str> {
        self.references
            .iter()
            .filter(|r| r.kind == ReferenceKind::Quoted)
            .map(|r| r.target_id.as_str())
    }
}

/// The account that wrote a post.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: String,
    pub handle: String,
    pub name: String,
    pub description: Option<String>,
    /// Link entities scoped to `description`.
    pub description_entities: Vec<LinkEntity>,
}

impl Author {
    /// Public profile URL.
    pub fn profile_url(&self) -> String {
        format!("{}/{}", PROFILE_BASE, self.handle)
    }

    /// Canonical URL of a post written by this author.
    pub fn post_url(&self, post_id: &str) -> String {
        format!("{}/{}/status/{}", PROFILE_BASE, self.handle, post_id)
    }
}

/// A shortened URL occurrence within text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkEntity {
    /// Short URL exactly as it appears in the text.
    pub url: String,
    /// Final destination; only present for external resources.
    pub unwound_url: Option<String>,
    /// Expanded form; the only one author descriptions carry.
    pub expanded_url: Option<String>,
}

/// A reference from one post to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub kind: ReferenceKind,
    pub target_id: String,
}

/// Kind of post reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceKind {
    Quoted,
    RepliedTo,
    Retweeted,
    Other(String),
}

impl From<&str> for ReferenceKind {
    fn from(s: &str) -> Self {
        match s {
            "quoted" => ReferenceKind::Quoted,
            "replied_to" => ReferenceKind::RepliedTo,
            "retweeted" => ReferenceKind::Retweeted,
            other => ReferenceKind::Other(other.to_string()),
        }
    }
}
