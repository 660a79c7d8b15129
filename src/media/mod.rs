//! Media module for attachment representation and variant selection.

pub mod extension;
pub mod item;
pub mod selector;

pub use extension::media_extension;
pub use item::{MediaItem, MediaSource, MediaVariant};
pub use selector::{select_media, select_media_url, SelectedMedia};
