//! X API module.
//!
//! This module provides:
//! - The `Session` trait the export pipeline depends on
//! - HTTP client for the X API v2
//! - OAuth2 PKCE login and token revocation
//! - API response types and their conversion into the domain model

pub mod auth;
pub mod client;
pub mod session;
pub mod types;

pub use auth::{LoginAttempt, OAuthClient, TokenPair};
pub use client::{XApi, API_BASE};
pub use session::{Download, Session};
