//! X API v2 HTTP client.

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::api::session::{Download, Session};
use crate::api::types::*;
use crate::error::{Error, Result};
use crate::model::{BookmarkPage, Post, PostExpansion, UserIdentity};

/// Default API base URL.
pub const API_BASE: &str = "https://api.twitter.com";

/// User agent sent with every request.
const USER_AGENT: &str = concat!("bookmark-exporter/", env!("CARGO_PKG_VERSION"));

/// Field expansion set sent with every post-bearing request.
pub const EXPANSION_QUERY: [(&str, &str); 4] = [
    ("expansions", "attachments.media_keys,author_id"),
    ("media.fields", "url,variants"),
    ("user.fields", "name,description,entities"),
    ("tweet.fields", "entities,created_at,referenced_tweets"),
];

/// X API client authenticated with an OAuth2 user access token.
pub struct XApi {
    client: Client,
    api_base: String,
    access_token: String,
}

impl XApi {
    /// Create a new API client.
    pub fn new(access_token: String, api_base: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            access_token,
        })
    }

    /// Make an authenticated GET request.
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Response> {
        let url = format!("{}{}", self.api_base, path);

        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Auth error response: {}", body);
            return Err(Error::Session(format!(
                "HTTP {}: {}",
                status,
                if body.is_empty() {
                    "Access token rejected"
                } else {
                    body.as_str()
                }
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!("GET {} failed: HTTP {}: {}", path, status, body)));
        }

        Ok(response)
    }

    /// GET and decode a v2 envelope.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<ApiResponse<T>> {
        let response = self.get(path, query).await?;
        let text = response.text().await?;
        tracing::debug!("{} response: {} bytes", what, text.len());

        serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse {}: {} - Response: {}",
                what,
                e,
                text.chars().take(500).collect::<String>()
            ))
        })
    }
}

#[async_trait]
impl Session for XApi {
    async fn me(&self) -> Result<UserIdentity> {
        let api_response: ApiResponse<WireUser> =
            self.get_json("/2/users/me", &[], "user identity").await?;

        match api_response.data {
            Some(user) => UserIdentity::try_from(user),
            None => Err(Error::Session(
                api_response
                    .errors
                    .first()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "Failed to get authenticated user".into()),
            )),
        }
    }

    async fn bookmarks_page(&self, user_id: &str, cursor: Option<&str>) -> Result<BookmarkPage> {
        let path = format!("/2/users/{}/bookmarks", user_id);

        let mut query: Vec<(&str, &str)> = EXPANSION_QUERY.to_vec();
        if let Some(cursor) = cursor {
            query.push(("pagination_token", cursor));
        }

        let api_response: ApiResponse<Vec<WireTweet>> =
            self.get_json(&path, &query, "bookmarks").await?;

        BookmarkPage::try_from(api_response)
    }

    async fn post(&self, post_id: &str) -> Result<Option<PostExpansion>> {
        let path = format!("/2/tweets/{}", post_id);

        let api_response: ApiResponse<WireTweet> =
            self.get_json(&path, &EXPANSION_QUERY, "post").await?;

        let Some(tweet) = api_response.data else {
            if let Some(problem) = api_response.errors.first() {
                tracing::warn!("Post {} unavailable: {}", post_id, problem);
            }
            return Ok(None);
        };

        let post = Post::try_from(tweet)?;
        let (media, authors) = api_response.includes.into_model()?;

        Ok(Some(PostExpansion {
            post,
            media,
            authors,
        }))
    }

    async fn download(&self, url: &str) -> Result<Download> {
        tracing::debug!("Downloading {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "Failed to download {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let bytes = response.bytes().await?.to_vec();

        Ok(Download {
            bytes,
            content_type,
        })
    }
}
