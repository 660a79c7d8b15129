//! Per-run export statistics.

/// Counters for one export run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExportStats {
    pub bookmarks: u64,
    pub quoted_posts: u64,
    pub media_files: u64,
    /// Attachments with an unknown media key or no selectable URL.
    pub media_skipped: u64,
    pub bytes_written: u64,
}

impl ExportStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_bookmark(&mut self) {
        self.bookmarks += 1;
    }

    pub fn increment_quoted(&mut self) {
        self.quoted_posts += 1;
    }

    pub fn increment_skipped(&mut self) {
        self.media_skipped += 1;
    }

    /// Record a written media file.
    pub fn add_media_file(&mut self, bytes: usize) {
        self.media_files += 1;
        self.bytes_written += bytes as u64;
    }

    /// Record a written markdown file.
    pub fn add_markdown(&mut self, bytes: usize) {
        self.bytes_written += bytes as u64;
    }

    /// Total posts written, bookmarks and quoted.
    pub fn total_posts(&self) -> u64 {
        self.bookmarks + self.quoted_posts
    }
}
