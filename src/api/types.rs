//! API response type definitions and their conversion into the domain model.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::media::{MediaItem, MediaSource, MediaVariant};
use crate::model::{Author, BookmarkPage, LinkEntity, Post, Reference, UserIdentity};

/// Generic v2 response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub includes: Includes,
    pub meta: Option<Meta>,
    #[serde(default)]
    pub errors: Vec<ApiProblem>,
}

/// Expanded objects inlined next to the primary data.
#[derive(Debug, Default, Deserialize)]
pub struct Includes {
    #[serde(default)]
    pub media: Vec<WireMedia>,
    #[serde(default)]
    pub users: Vec<WireUser>,
}

/// Pagination metadata.
#[derive(Debug, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub result_count: Option<u32>,
    pub next_token: Option<String>,
}

/// Partial error reported inside a 200 response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiProblem {
    pub title: Option<String>,
    pub detail: Option<String>,
    #[serde(rename = "type")]
    pub problem_type: Option<String>,
}

impl std::fmt::Display for ApiProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.title, &self.detail) {
            (Some(title), Some(detail)) => write!(f, "{}: {}", title, detail),
            (Some(s), None) | (None, Some(s)) => write!(f, "{}", s),
            (None, None) => write!(f, "unknown problem"),
        }
    }
}

/// A post as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct WireTweet {
    pub id: String,
    pub author_id: Option<String>,
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
    pub entities: Option<WireEntities>,
    pub attachments: Option<WireAttachments>,
    #[serde(default)]
    pub referenced_tweets: Vec<WireReference>,
}

/// Entity block of a post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireEntities {
    #[serde(default)]
    pub urls: Vec<WireUrlEntity>,
}

/// A URL entity.
#[derive(Debug, Clone, Deserialize)]
pub struct WireUrlEntity {
    pub url: String,
    pub expanded_url: Option<String>,
    pub unwound_url: Option<String>,
}

/// Attachment block of a post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireAttachments {
    #[serde(default)]
    pub media_keys: Vec<String>,
}

/// A referenced post.
#[derive(Debug, Clone, Deserialize)]
pub struct WireReference {
    #[serde(rename = "type")]
    pub reference_type: String,
    pub id: String,
}

/// A media object from `includes.media`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireMedia {
    pub media_key: String,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub url: Option<String>,
    pub variants: Option<Vec<WireVariant>>,
}

/// A video variant.
#[derive(Debug, Clone, Deserialize)]
pub struct WireVariant {
    pub url: String,
    pub bit_rate: Option<u64>,
    pub content_type: Option<String>,
}

/// A user from `includes.users` or `/users/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub entities: Option<WireUserEntities>,
}

/// Entity block of a user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireUserEntities {
    pub description: Option<WireEntities>,
}

/// OAuth2 token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
    pub scope: Option<String>,
}

fn numeric_id() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{1,20}$").expect("static regex"))
}

fn media_key_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{1,3}_\d{1,20}$").expect("static regex"))
}

fn check_id(kind: &str, id: &str) -> Result<()> {
    if numeric_id().is_match(id) {
        Ok(())
    } else {
        Err(Error::Api(format!("Malformed {} id in response: {:?}", kind, id)))
    }
}

fn convert_entities(entities: Option<WireEntities>) -> Vec<LinkEntity> {
    entities
        .map(|e| {
            e.urls
                .into_iter()
                .map(|u| LinkEntity {
                    url: u.url,
                    unwound_url: u.unwound_url,
                    expanded_url: u.expanded_url,
                })
                .collect()
        })
        .unwrap_or_default()
}

impl TryFrom<WireTweet> for Post {
    type Error = Error;

    fn try_from(tweet: WireTweet) -> Result<Self> {
        check_id("post", &tweet.id)?;

        let author_id = tweet.author_id.ok_or_else(|| {
            Error::Api(format!("Post {} has no author_id expansion", tweet.id))
        })?;
        check_id("author", &author_id)?;

        let references = tweet
            .referenced_tweets
            .into_iter()
            .map(|r| {
                check_id("referenced post", &r.id)?;
                Ok(Reference {
                    kind: r.reference_type.as_str().into(),
                    target_id: r.id,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Post {
            id: tweet.id,
            author_id,
            text: tweet.text,
            entities: convert_entities(tweet.entities),
            media_keys: tweet
                .attachments
                .map(|a| a.media_keys)
                .unwrap_or_default(),
            created_at: tweet.created_at,
            references,
        })
    }
}

impl TryFrom<WireMedia> for MediaItem {
    type Error = Error;

    fn try_from(media: WireMedia) -> Result<Self> {
        if !media_key_pattern().is_match(&media.media_key) {
            return Err(Error::Api(format!(
                "Malformed media key in response: {:?}",
                media.media_key
            )));
        }

        let source = match (media.url, media.variants) {
            (Some(url), _) => MediaSource::Direct { url },
            (None, Some(variants)) => MediaSource::Variants(
                variants
                    .into_iter()
                    .map(|v| MediaVariant {
                        url: v.url,
                        bit_rate: v.bit_rate,
                        content_type: v.content_type,
                    })
                    .collect(),
            ),
            (None, None) => {
                tracing::debug!(
                    "{} media {} has neither url nor variants",
                    media.media_type.as_deref().unwrap_or("unknown"),
                    media.media_key
                );
                MediaSource::Unavailable
            }
        };

        Ok(MediaItem {
            media_key: media.media_key,
            source,
        })
    }
}

impl TryFrom<WireUser> for Author {
    type Error = Error;

    fn try_from(user: WireUser) -> Result<Self> {
        check_id("user", &user.id)?;

        let description_entities =
            convert_entities(user.entities.and_then(|e| e.description));

        Ok(Author {
            id: user.id,
            handle: user.username,
            name: user.name,
            description: user.description,
            description_entities,
        })
    }
}

impl TryFrom<WireUser> for UserIdentity {
    type Error = Error;

    fn try_from(user: WireUser) -> Result<Self> {
        check_id("user", &user.id)?;
        Ok(UserIdentity {
            id: user.id,
            handle: user.username,
        })
    }
}

impl Includes {
    /// Convert the side-tables into domain values.
    pub fn into_model(self) -> Result<(Vec<MediaItem>, Vec<Author>)> {
        let media = self
            .media
            .into_iter()
            .map(MediaItem::try_from)
            .collect::<Result<Vec<_>>>()?;
        let authors = self
            .users
            .into_iter()
            .map(Author::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok((media, authors))
    }
}

impl TryFrom<ApiResponse<Vec<WireTweet>>> for BookmarkPage {
    type Error = Error;

    fn try_from(response: ApiResponse<Vec<WireTweet>>) -> Result<Self> {
        let (next_cursor, result_count) = match response.meta {
            Some(meta) => (meta.next_token, meta.result_count),
            None => (None, None),
        };
        tracing::debug!(
            "Bookmark page: {} results, more: {}",
            result_count.unwrap_or(0),
            next_cursor.is_some()
        );

        // An empty bookmark list comes back without `data`.
        let tweets = match response.data {
            Some(tweets) => tweets,
            None if !response.errors.is_empty() => {
                return Err(Error::Api(format!(
                    "Bookmark page failed: {}",
                    response.errors[0]
                )));
            }
            None => Vec::new(),
        };

        let posts = tweets
            .into_iter()
            .map(Post::try_from)
            .collect::<Result<Vec<_>>>()?;
        let (media, authors) = response.includes.into_model()?;

        Ok(BookmarkPage {
            posts,
            media,
            authors,
            next_cursor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReferenceKind;

    const PAGE: &str = r#"{
        "data": [{
            "id": "1700000000000000001",
            "author_id": "2244994945",
            "text": "new docs https://t.co/abc",
            "created_at": "2023-11-08T12:00:00.000Z",
            "entities": {"urls": [{
                "start": 9, "end": 32,
                "url": "https://t.co/abc",
                "expanded_url": "https://example.com/docs",
                "unwound_url": "https://example.com/docs/v2"
            }]},
            "attachments": {"media_keys": ["3_1700000000000000002", "7_1700000000000000003"]},
            "referenced_tweets": [{"type": "quoted", "id": "1600000000000000000"}]
        }],
        "includes": {
            "media": [
                {"media_key": "3_1700000000000000002", "type": "photo", "url": "https://pbs.twimg.com/media/x.jpg"},
                {"media_key": "7_1700000000000000003", "type": "video", "variants": [
                    {"content_type": "application/x-mpegURL", "url": "https://video.twimg.com/pl.m3u8"},
                    {"bit_rate": 832000, "content_type": "video/mp4", "url": "https://video.twimg.com/v.mp4"}
                ]}
            ],
            "users": [{
                "id": "2244994945", "username": "XDevelopers", "name": "Developers",
                "description": "docs: https://t.co/dev",
                "entities": {"description": {"urls": [{"url": "https://t.co/dev", "expanded_url": "https://developer.x.com"}]}}
            }]
        },
        "meta": {"result_count": 1, "next_token": "7140dibdnow9c7btw3w29grvxfcgvpb9n9coehpk7xz5i"}
    }"#;

    #[test]
    fn test_bookmark_page_conversion() {
        let response: ApiResponse<Vec<WireTweet>> = serde_json::from_str(PAGE).unwrap();
        let page = BookmarkPage::try_from(response).unwrap();

        assert_eq!(
            page.next_cursor.as_deref(),
            Some("7140dibdnow9c7btw3w29grvxfcgvpb9n9coehpk7xz5i")
        );
        assert_eq!(page.posts.len(), 1);

        let post = &page.posts[0];
        assert_eq!(post.media_keys.len(), 2);
        assert_eq!(post.references[0].kind, ReferenceKind::Quoted);
        assert_eq!(
            post.entities[0].unwound_url.as_deref(),
            Some("https://example.com/docs/v2")
        );
        assert!(post.created_at.is_some());

        assert!(matches!(page.media[0].source, MediaSource::Direct { .. }));
        match &page.media[1].source {
            MediaSource::Variants(v) => {
                assert_eq!(v.len(), 2);
                assert_eq!(v[0].bit_rate, None);
                assert_eq!(v[1].bit_rate, Some(832000));
            }
            other => panic!("unexpected source {:?}", other),
        }

        let author = &page.authors[0];
        assert_eq!(author.handle, "XDevelopers");
        assert_eq!(
            author.description_entities[0].expanded_url.as_deref(),
            Some("https://developer.x.com")
        );
    }

    #[test]
    fn test_last_page_without_includes() {
        let json = r#"{"data": [{"id": "5", "author_id": "6", "text": "hi"}], "meta": {"result_count": 1}}"#;
        let response: ApiResponse<Vec<WireTweet>> = serde_json::from_str(json).unwrap();
        let page = BookmarkPage::try_from(response).unwrap();
        assert!(page.next_cursor.is_none());
        assert!(page.media.is_empty());
        assert!(page.authors.is_empty());
        assert!(page.posts[0].entities.is_empty());
    }

    #[test]
    fn test_empty_bookmark_list() {
        let json = r#"{"meta": {"result_count": 0}}"#;
        let response: ApiResponse<Vec<WireTweet>> = serde_json::from_str(json).unwrap();
        let page = BookmarkPage::try_from(response).unwrap();
        assert!(page.posts.is_empty());
    }

    #[test]
    fn test_errors_without_data_fail() {
        let json = r#"{"errors": [{"title": "Forbidden", "detail": "nope"}]}"#;
        let response: ApiResponse<Vec<WireTweet>> = serde_json::from_str(json).unwrap();
        assert!(matches!(BookmarkPage::try_from(response), Err(Error::Api(_))));
    }

    #[test]
    fn test_malformed_ids_rejected() {
        let json = r#"{"data": [{"id": "../../etc", "author_id": "6", "text": "hi"}]}"#;
        let response: ApiResponse<Vec<WireTweet>> = serde_json::from_str(json).unwrap();
        assert!(BookmarkPage::try_from(response).is_err());

        let media = WireMedia {
            media_key: "3_../x".into(),
            media_type: None,
            url: None,
            variants: None,
        };
        assert!(MediaItem::try_from(media).is_err());
    }

    #[test]
    fn test_media_without_url_or_variants() {
        let media = WireMedia {
            media_key: "16_1".into(),
            media_type: Some("animated_gif".into()),
            url: None,
            variants: None,
        };
        let item = MediaItem::try_from(media).unwrap();
        assert_eq!(item.source, MediaSource::Unavailable);
    }
}
