//! Strongly typed domain model produced at the API ingestion boundary.

pub mod page;
pub mod post;

pub use page::{BookmarkPage, EntityLookup, PostExpansion, UserIdentity};
pub use post::{Author, LinkEntity, Post, Reference, ReferenceKind};
