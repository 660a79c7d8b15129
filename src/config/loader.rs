//! Configuration structures and loading logic.

use crate::api::auth::AUTH_BASE;
use crate::api::client::API_BASE;
use crate::error::{Error, Result};
use crate::export::PackagingKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default OAuth2 redirect URI.
pub const DEFAULT_CALLBACK_URL: &str = "http://127.0.0.1:3000/callback";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Credentials and OAuth2 client registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// OAuth2 user access token.
    #[serde(default)]
    pub access_token: String,

    /// Refresh token stored by `login`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// OAuth2 client id of the registered app.
    #[serde(default)]
    pub client_id: String,

    /// Client secret for confidential clients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// Redirect URI registered for the app.
    #[serde(default = "default_callback_url")]
    pub callback_url: String,
}

/// Export options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Directory the session tree and archive are written to.
    #[serde(default)]
    pub output_directory: Option<PathBuf>,

    /// API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Host serving the OAuth2 consent page.
    #[serde(default = "default_auth_base")]
    pub auth_base: String,

    /// How the finished tree is compressed.
    #[serde(default)]
    pub packaging: PackagingKind,

    /// External zip program for `packaging = "command"`.
    #[serde(default = "default_zip_command")]
    pub zip_command: String,

    /// Whether to show progress bars.
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            output_directory: None,
            api_base: default_api_base(),
            auth_base: default_auth_base(),
            packaging: PackagingKind::default(),
            zip_command: default_zip_command(),
            show_progress: true,
        }
    }
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            refresh_token: None,
            client_id: String::new(),
            client_secret: None,
            callback_url: default_callback_url(),
        }
    }
}

fn default_callback_url() -> String {
    DEFAULT_CALLBACK_URL.to_string()
}

fn default_api_base() -> String {
    API_BASE.to_string()
}

fn default_auth_base() -> String {
    AUTH_BASE.to_string()
}

fn default_zip_command() -> String {
    "zip".to_string()
}

fn default_true() -> bool {
    true
}

/// Per-user default config location, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "bookmark-exporter")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the effective output directory.
    pub fn output_directory(&self) -> PathBuf {
        self.options
            .output_directory
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }

    /// Store a freshly granted token pair and save to file if path provided.
    pub fn update_tokens(
        &mut self,
        access_token: String,
        refresh_token: Option<String>,
        path: Option<&Path>,
    ) -> Result<()> {
        self.account.access_token = access_token;
        self.account.refresh_token = refresh_token;

        if let Some(path) = path {
            self.save(path)?;
        }

        Ok(())
    }
}
