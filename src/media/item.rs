//! Media attachment representation.

/// A media attachment as returned alongside posts.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    /// Unique media key (e.g. `3_1234567890`).
    pub media_key: String,

    /// Where the bytes can be fetched from.
    pub source: MediaSource,
}

/// The downloadable representation(s) of a media attachment.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaSource {
    /// Photos expose a single direct URL.
    Direct { url: String },

    /// Videos and animated GIFs expose several encodings.
    Variants(Vec<MediaVariant>),

    /// Neither a URL nor variants were included.
    Unavailable,
}

/// One encoding of a video or animated GIF.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaVariant {
    pub url: String,

    /// Absent for non-playable variants such as HLS manifests.
    pub bit_rate: Option<u64>,

    pub content_type: Option<String>,
}

impl MediaItem {
    /// Build a photo item.
    pub fn direct(media_key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            media_key: media_key.into(),
            source: MediaSource::Direct { url: url.into() },
        }
    }

    /// Build a video item.
    pub fn with_variants(media_key: impl Into<String>, variants: Vec<MediaVariant>) -> Self {
        Self {
            media_key: media_key.into(),
            source: MediaSource::Variants(variants),
        }
    }
}

impl MediaVariant {
    pub fn new(url: impl Into<String>, bit_rate: Option<u64>) -> Self {
        Self {
            url: url.into(),
            bit_rate,
            content_type: None,
        }
    }
}
