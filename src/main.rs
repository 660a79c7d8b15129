//! Bookmark Exporter - CLI entry point.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use bookmark_exporter::{
    api::{OAuthClient, XApi},
    cli::{Args, Command},
    config::{default_config_path, validate_config, validate_login_config, Config},
    error::{exit_codes, Error, Result},
    export::{export_bookmarks, packager_for, ExportOptions},
    output::{
        print_banner, print_config_summary, print_error, print_export_stats, print_info,
        print_login_url, print_success, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            tracing::error!("{}", e);
            print_error(&format!("{}", e));
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = match default_config_path() {
        Some(user_path) if !args.config.exists() && user_path.exists() => user_path,
        _ => args.config.clone(),
    };
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    match args.command() {
        Command::Export => run_export(&config).await,
        Command::Login => run_login(&mut config, &config_path).await,
        Command::Revoke => run_revoke(&config).await,
    }
}

/// Export all bookmarks and report the archive.
async fn run_export(config: &Config) -> Result<()> {
    validate_config(config)?;

    print_config_summary(config);

    let api = XApi::new(config.account.access_token.clone(), &config.options.api_base)?;
    let packager = packager_for(config.options.packaging, &config.options.zip_command);
    let options = ExportOptions {
        output_directory: config.output_directory(),
        show_progress: config.options.show_progress,
    };

    print_info("Exporting bookmarks...");
    let summary = export_bookmarks(&api, packager.as_ref(), &options).await?;

    print_export_stats(&summary);
    print_success("Done!");

    Ok(())
}

fn oauth_client(config: &Config) -> Result<OAuthClient> {
    validate_login_config(config)?;

    OAuthClient::new(
        config.account.client_id.clone(),
        config.account.client_secret.clone(),
        config.account.callback_url.clone(),
        &config.options.auth_base,
        &config.options.api_base,
    )
}

/// Run the PKCE flow interactively and persist the token pair.
async fn run_login(config: &mut Config, config_path: &Path) -> Result<()> {
    let client = oauth_client(config)?;
    let attempt = client.begin_login()?;

    print_login_url(attempt.authorization_url().as_str());
    print!("Paste the URL you were redirected to: ");
    io::stdout().flush()?;

    let mut callback = String::new();
    io::stdin().lock().read_line(&mut callback)?;
    if callback.trim().is_empty() {
        return Err(Error::Session("No callback URL entered".into()));
    }

    let grant = attempt.verify_callback(&callback)?;
    let tokens = client.exchange(grant).await?;

    config.update_tokens(tokens.access_token, tokens.refresh_token, Some(config_path))?;

    match tokens.expires_in {
        Some(secs) => print_success(&format!(
            "Access token saved to {} (expires in {} minutes)",
            config_path.display(),
            secs / 60
        )),
        None => print_success(&format!("Access token saved to {}", config_path.display())),
    }

    Ok(())
}

/// Revoke the configured access token.
async fn run_revoke(config: &Config) -> Result<()> {
    if config.account.access_token.is_empty() {
        return Err(Error::MissingConfig("access_token".into()));
    }

    let client = oauth_client(config)?;
    client.revoke(&config.account.access_token).await?;

    print_success("Access token revoked");
    Ok(())
}
