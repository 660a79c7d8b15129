//! Console output utilities.

use console::{style, Style};

use crate::config::Config;

/// Severity of a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

impl Tone {
    fn tag(self) -> &'static str {
        match self {
            Tone::Info => "INFO",
            Tone::Success => "OK",
            Tone::Warning => "WARN",
            Tone::Error => "ERROR",
        }
    }

    fn style(self) -> Style {
        let base = Style::new().bold();
        match self {
            Tone::Info => base.cyan(),
            Tone::Success => base.green(),
            Tone::Warning => base.yellow(),
            Tone::Error => base.red(),
        }
    }
}

fn tagged(tone: Tone, message: &str) -> String {
    format!("{:>5} {}", tone.style().apply_to(tone.tag()), message)
}

pub fn print_info(message: &str) {
    println!("{}", tagged(Tone::Info, message));
}

pub fn print_success(message: &str) {
    println!("{}", tagged(Tone::Success, message));
}

/// Warnings and errors go to stderr so piped stdout stays clean.
pub fn print_warning(message: &str) {
    eprintln!("{}", tagged(Tone::Warning, message));
}

pub fn print_error(message: &str) {
    eprintln!("{}", tagged(Tone::Error, message));
}

/// Print the application banner.
pub fn print_banner() {
    println!(
        "{} {}",
        style("bookmark-exporter").cyan().bold(),
        style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
    );
    println!("{}", style("saved posts -> markdown + media -> zip").dim());
    println!();
}

/// Print the settings an export run will use.
pub fn print_config_summary(config: &Config) {
    let output = config.output_directory();
    let rows = [
        ("API", config.options.api_base.clone()),
        ("Output", output.display().to_string()),
        ("Packaging", config.options.packaging.to_string()),
        (
            "Progress",
            if config.options.show_progress { "on" } else { "off" }.to_string(),
        ),
    ];

    println!("{}", style("Configuration:").bold());
    for (label, value) in rows {
        println!("  {:<10} {}", format!("{}:", label), value);
    }
    println!();
}

/// Print the consent URL for `login`.
pub fn print_login_url(url: &str) {
    println!("{}", tagged(Tone::Info, "Open this URL and authorize the app:"));
    println!();
    println!("  {}", style(url).underlined());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_keeps_message() {
        console::set_colors_enabled(false);
        assert_eq!(tagged(Tone::Warning, "careful"), " WARN careful");
        assert_eq!(tagged(Tone::Error, "boom"), "ERROR boom");
    }
}
