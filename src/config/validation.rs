//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};
use regex::Regex;
use url::Url;

/// Minimum length for an access token.
const MIN_TOKEN_LENGTH: usize = 16;

/// Validate everything an export run needs.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_token(&config.account.access_token)?;
    validate_url("api_base", &config.options.api_base)?;

    if config.options.zip_command.trim().is_empty() {
        return Err(Error::MissingConfig("zip_command".to_string()));
    }

    Ok(())
}

/// Validate what `login` and `revoke` need.
pub fn validate_login_config(config: &Config) -> Result<()> {
    validate_client_id(&config.account.client_id)?;
    validate_url("callback_url", &config.account.callback_url)?;
    validate_url("auth_base", &config.options.auth_base)?;
    validate_url("api_base", &config.options.api_base)?;
    Ok(())
}

/// Validate the OAuth2 access token.
pub fn validate_token(token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(Error::MissingConfig(
            "access_token (run `bookmark-exporter login` or pass --token)".to_string(),
        ));
    }

    if token.len() < MIN_TOKEN_LENGTH {
        return Err(Error::ConfigValidation {
            field: "access_token".to_string(),
            message: format!(
                "Token must be at least {} characters (got {})",
                MIN_TOKEN_LENGTH,
                token.len()
            ),
        });
    }

    if token.chars().any(char::is_whitespace) {
        return Err(Error::ConfigValidation {
            field: "access_token".to_string(),
            message: "Token must not contain whitespace".to_string(),
        });
    }

    check_placeholder("access_token", token)
}

/// Validate the OAuth2 client id.
pub fn validate_client_id(client_id: &str) -> Result<()> {
    if client_id.is_empty() {
        return Err(Error::MissingConfig(
            "client_id (from the app's OAuth 2.0 settings)".to_string(),
        ));
    }

    let pattern = Regex::new(r"^[A-Za-z0-9_\-:.]+$").unwrap();
    if !pattern.is_match(client_id) {
        return Err(Error::ConfigValidation {
            field: "client_id".to_string(),
            message: format!("Client id '{}' contains invalid characters", client_id),
        });
    }

    check_placeholder("client_id", client_id)
}

/// Validate that `value` is an absolute http(s) URL.
pub fn validate_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| Error::ConfigValidation {
        field: field.to_string(),
        message: format!("'{}' is not a valid URL: {}", value, e),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: format!("'{}' must use http or https", value),
        });
    }

    Ok(())
}

fn check_placeholder(field: &str, value: &str) -> Result<()> {
    let lower = value.to_lowercase();
    if lower.contains("replaceme") || lower.contains("your_token") || lower.contains("your_client")
    {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: "Value appears to be a placeholder".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "bWlzc2luZy10b2tlbi1mb3ItdGVzdHM6MTY5OTk5OTk5OTox";

    #[test]
    fn test_valid_token() {
        assert!(validate_token(TOKEN).is_ok());
    }

    #[test]
    fn test_missing_token() {
        assert!(matches!(validate_token(""), Err(Error::MissingConfig(_))));
    }

    #[test]
    fn test_invalid_tokens() {
        assert!(validate_token("short").is_err());
        assert!(validate_token("REPLACEME_REPLACEME_REPLACEME").is_err());
        assert!(validate_token("has a space in the middle of it").is_err());
    }

    #[test]
    fn test_client_id() {
        assert!(validate_client_id("M1M5R3BMVy13QmpScXkzTUt5OE46MTpjaQ").is_ok());
        assert!(validate_client_id("").is_err());
        assert!(validate_client_id("bad id!").is_err());
        assert!(validate_client_id("your_client_id").is_err());
    }

    #[test]
    fn test_urls() {
        assert!(validate_url("api_base", "https://api.twitter.com").is_ok());
        assert!(validate_url("callback_url", "http://127.0.0.1:3000/callback").is_ok());
        assert!(validate_url("api_base", "api.twitter.com").is_err());
        assert!(validate_url("api_base", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_config() {
        let mut config = Config::default();
        assert!(validate_config(&config).is_err());

        config.account.access_token = TOKEN.to_string();
        assert!(validate_config(&config).is_ok());

        config.options.api_base = "nope".to_string();
        assert!(validate_config(&config).is_err());
    }
}
