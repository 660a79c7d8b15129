//! Command-line argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Config;
use crate::export::PackagingKind;

/// Bookmark exporter CLI.
#[derive(Parser, Debug)]
#[command(
    name = "bookmark-exporter",
    version,
    about = "Export your saved X/Twitter bookmarks into a zip archive",
    long_about = "Exports every bookmarked post into its own directory with a markdown file \
                  (text and author metadata) and its media, quoted posts nested one level \
                  below, then zips the tree.\n\n\
                  Run `login` once to obtain an access token, then run without a subcommand."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// OAuth2 user access token.
    #[arg(short, long, env = "X_ACCESS_TOKEN", global = true)]
    pub token: Option<String>,

    /// OAuth2 client id of the registered app.
    #[arg(long = "client-id", env = "X_CLIENT_ID", global = true)]
    pub client_id: Option<String>,

    /// OAuth2 client secret (confidential clients only).
    #[arg(long = "client-secret", env = "X_CLIENT_SECRET", global = true)]
    pub client_secret: Option<String>,

    /// Directory the export tree and archive are written to.
    #[arg(short, long = "output", global = true)]
    pub output_directory: Option<PathBuf>,

    /// How the finished tree is compressed.
    #[arg(long, value_enum, global = true)]
    pub packaging: Option<PackagingArg>,

    /// API base URL.
    #[arg(long = "api-base", global = true)]
    pub api_base: Option<String>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    /// Hide progress bars.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Export all bookmarks (default).
    Export,
    /// Authorize the app and store the token pair in the config file.
    Login,
    /// Revoke the configured access token.
    Revoke,
}

/// CLI packaging argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PackagingArg {
    /// Built-in zip writer.
    Builtin,
    /// External `zip` program.
    Command,
}

impl From<PackagingArg> for PackagingKind {
    fn from(arg: PackagingArg) -> Self {
        match arg {
            PackagingArg::Builtin => PackagingKind::Builtin,
            PackagingArg::Command => PackagingKind::Command,
        }
    }
}

impl Args {
    /// The subcommand to run.
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Export)
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(token) = &self.token {
            config.account.access_token = token.clone();
        }

        if let Some(client_id) = &self.client_id {
            config.account.client_id = client_id.clone();
        }

        if let Some(secret) = &self.client_secret {
            config.account.client_secret = Some(secret.clone());
        }

        if let Some(dir) = &self.output_directory {
            config.options.output_directory = Some(dir.clone());
        }

        if let Some(packaging) = self.packaging {
            config.options.packaging = packaging.into();
        }

        if let Some(api_base) = &self.api_base {
            config.options.api_base = api_base.clone();
        }

        if self.quiet {
            config.options.show_progress = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_export() {
        let args = Args::try_parse_from(["bookmark-exporter"]).unwrap();
        assert_eq!(args.command(), Command::Export);
        assert_eq!(args.config, PathBuf::from("config.toml"));
    }

    #[test]
    fn test_merge_overrides() {
        let args = Args::try_parse_from([
            "bookmark-exporter",
            "--token",
            "cli-token-value-123456",
            "--output",
            "/exports",
            "--packaging",
            "command",
            "--quiet",
        ])
        .unwrap();

        let mut config = Config::default();
        args.merge_into_config(&mut config);

        assert_eq!(config.account.access_token, "cli-token-value-123456");
        assert_eq!(config.output_directory(), PathBuf::from("/exports"));
        assert_eq!(config.options.packaging, PackagingKind::Command);
        assert!(!config.options.show_progress);
    }

    #[test]
    fn test_login_subcommand_with_global_flag() {
        let args =
            Args::try_parse_from(["bookmark-exporter", "login", "--client-id", "abc"]).unwrap();
        assert_eq!(args.command(), Command::Login);
        assert_eq!(args.client_id.as_deref(), Some("abc"));
    }
}
