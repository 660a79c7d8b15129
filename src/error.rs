//! Error types for the bookmark-exporter application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // Session errors
    #[error("Session error: {0}")]
    Session(String),

    // API errors
    #[error("API error: {0}")]
    Api(String),

    #[error("Rate limited by the API (HTTP 429)")]
    RateLimited,

    #[error("Malformed reference to post {post_id}: {reason}")]
    MalformedReference { post_id: String, reason: String },

    #[error("Author {author_id} of post {post_id} missing from bookmark expansions")]
    MissingAuthor { post_id: String, author_id: String },

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    // Packaging errors
    #[error("Packaging failed: {0}")]
    Packaging(String),

    // File system errors
    #[error("Invalid filename (path traversal attempt): {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit code for this error class.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_)
            | Error::ConfigValidation { .. }
            | Error::MissingConfig(_)
            | Error::TomlParse(_)
            | Error::UrlParse(_) => exit_codes::CONFIG_ERROR,
            Error::Session(_) => exit_codes::SESSION_ERROR,
            Error::Api(_)
            | Error::RateLimited
            | Error::MalformedReference { .. }
            | Error::MissingAuthor { .. }
            | Error::Http(_)
            | Error::Json(_) => exit_codes::API_ERROR,
            Error::Download(_) => exit_codes::DOWNLOAD_ERROR,
            Error::Packaging(_) | Error::Zip(_) => exit_codes::PACKAGING_ERROR,
            _ => exit_codes::UNEXPECTED_ERROR,
        }
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
    pub const SESSION_ERROR: i32 = 6;
    pub const PACKAGING_ERROR: i32 = 7;
}
