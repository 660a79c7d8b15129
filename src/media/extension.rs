//! File extension derivation for downloaded media.

/// Fallback extension when nothing better is known.
const DEFAULT_EXTENSION: &str = "bin";

/// Derive the file extension for a downloaded media file.
///
/// The response's content type wins (`image/jpeg` becomes `jpeg`), then the
/// type the API declared for the variant, then the URL path.
pub fn media_extension(content_type: Option<&str>, declared: Option<&str>, url: &str) -> String {
    if let Some(ext) = [content_type, declared]
        .into_iter()
        .flatten()
        .find_map(extension_from_content_type)
    {
        return ext;
    }

    extension_from_url(url).unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

/// Subtype of a MIME type, with parameters stripped.
fn extension_from_content_type(content_type: &str) -> Option<String> {
    let essence = content_type.split(';').next()?.trim();
    let (_, subtype) = essence.split_once('/')?;

    if is_extension_like(subtype) {
        Some(subtype.to_lowercase())
    } else {
        None
    }
}

/// Extension from the URL path, only if `mime_guess` recognises it.
fn extension_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next()?;
    let filename = path.rsplit('/').next()?;
    let (_, ext) = filename.rsplit_once('.')?;

    if !is_extension_like(ext) {
        return None;
    }

    mime_guess::from_ext(ext)
        .first()
        .map(|_| ext.to_lowercase())
}

fn is_extension_like(s: &str) -> bool {
    !s.is_empty() && s.len() <= 10 && s.chars().all(|c| c.is_ascii_alphanumeric())
}
