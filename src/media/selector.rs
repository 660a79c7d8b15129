//! Best-representation selection for media attachments.

use crate::media::item::{MediaItem, MediaSource, MediaVariant};

/// The representation chosen for download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedMedia<'a> {
    pub url: &'a str,
    /// Content type declared by the variant, if any.
    pub content_type: Option<&'a str>,
}

/// Pick the URL to download for a media item.
pub fn select_media_url(item: &MediaItem) -> Option<&str> {
    select_media(item).map(|selected| selected.url)
}

/// Pick the representation to download for a media item.
///
/// Direct items return their URL. For variant lists the highest strictly
/// greater bit-rate wins against a running best seeded at zero, so equal
/// bit-rates keep the earlier variant and variants without a bit-rate are
/// never chosen. `None` means no file is produced for this attachment.
pub fn select_media(item: &MediaItem) -> Option<SelectedMedia<'_>> {
    match &item.source {
        MediaSource::Direct { url } => Some(SelectedMedia {
            url,
            content_type: None,
        }),
        MediaSource::Variants(variants) => {
            select_best_variant(variants).map(|v| SelectedMedia {
                url: &v.url,
                content_type: v.content_type.as_deref(),
            })
        }
        MediaSource::Unavailable => None,
    }
}

/// Select the variant with the strictly greatest defined bit-rate.
fn select_best_variant(variants: &[MediaVariant]) -> Option<&MediaVariant> {
    let mut best: Option<&MediaVariant> = None;
    let mut best_bit_rate = 0u64;

    for variant in variants {
        let Some(bit_rate) = variant.bit_rate else {
            continue;
        };

        if bit_rate > best_bit_rate {
            best = Some(variant);
            best_bit_rate = bit_rate;
        }
    }

    best
}
