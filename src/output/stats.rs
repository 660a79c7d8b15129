//! Statistics reporting.

use console::style;

use crate::export::ExportSummary;

/// Print statistics for a finished export.
pub fn print_export_stats(summary: &ExportSummary) {
    let stats = &summary.stats;

    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!(
        "{}",
        style(format!("Export for @{}:", summary.handle)).bold()
    );
    println!("  Bookmarks: {}", stats.bookmarks);
    println!("  Quoted:    {}", stats.quoted_posts);
    println!("  Posts:     {}", stats.total_posts());
    println!("  Media:     {} files", stats.media_files);
    if stats.media_skipped > 0 {
        println!(
            "  Skipped:   {} (no downloadable variant)",
            style(stats.media_skipped).yellow()
        );
    }
    println!("  Written:   {}", format_bytes(stats.bytes_written));
    println!("  Tree:      {}", summary.session_root.display());
    println!("  Archive:   {}", style(summary.archive.display()).green());
    println!("{}", style("═".repeat(50)).dim());
}

/// Human-readable byte count.
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
