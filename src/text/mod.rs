//! Text rewriting for post bodies and author descriptions.

pub mod normalize;

pub use normalize::{normalize_links, NormalizeMode};
