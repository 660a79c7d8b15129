//! Short-link normalization.

use crate::model::LinkEntity;

/// Which text a set of link entities belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeMode {
    /// Post text: unwound URLs replace short links, internal links are dropped.
    PostBody,
    /// Author description: expanded URLs replace short links when present.
    AuthorDescription,
}

/// Rewrite short links in `text` using `entities`, in entity order.
///
/// Each entity touches only the first literal occurrence of its short URL.
pub fn normalize_links(text: &str, entities: &[LinkEntity], mode: NormalizeMode) -> String {
    let mut out = text.to_string();

    for entity in entities {
        if entity.url.is_empty() {
            continue;
        }

        let replacement = match mode {
            NormalizeMode::PostBody => entity.unwound_url.as_deref().unwrap_or(""),
            NormalizeMode::AuthorDescription => match entity.expanded_url.as_deref() {
                Some(expanded) => expanded,
                None => continue,
            },
        };

        out = out.replacen(&entity.url, replacement, 1);
    }

    out
}
