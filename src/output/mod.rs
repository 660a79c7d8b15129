//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - Progress bars
//! - Export statistics

pub mod console;
pub mod progress;
pub mod stats;

pub use console::{
    print_banner, print_config_summary, print_error, print_info, print_login_url, print_success,
    print_warning,
};
pub use progress::{create_item_bar, create_spinner};
pub use stats::print_export_stats;
