//! Integration tests for the full export run against a mocked API.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use bookmark_exporter::export::{export_bookmarks, BuiltinZip, ExportOptions};
use bookmark_exporter::{Error, XApi};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "dGVzdC1hY2Nlc3MtdG9rZW4tZm9yLWV4cG9ydA";

fn me_body() -> serde_json::Value {
    serde_json::json!({
        "data": { "id": "100", "username": "jack", "name": "Jack" }
    })
}

fn author_json() -> serde_json::Value {
    serde_json::json!({
        "id": "100",
        "username": "jack",
        "name": "Jack",
        "description": "writing at https://t.co/blog",
        "entities": {
            "description": {
                "urls": [{ "url": "https://t.co/blog", "expanded_url": "https://jack.example" }]
            }
        }
    })
}

/// Two bookmarks: one with an external link, one with an image attachment.
fn single_page(server: &MockServer) -> serde_json::Value {
    serde_json::json!({
        "data": [
            {
                "id": "10",
                "author_id": "100",
                "text": "read this https://t.co/abc",
                "created_at": "2024-01-02T03:04:05.000Z",
                "entities": {
                    "urls": [{
                        "url": "https://t.co/abc",
                        "expanded_url": "https://t.co/abc",
                        "unwound_url": "https://example.com/article"
                    }]
                }
            },
            {
                "id": "11",
                "author_id": "100",
                "text": "look https://t.co/pic",
                "entities": { "urls": [{ "url": "https://t.co/pic" }] },
                "attachments": { "media_keys": ["3_111"] }
            }
        ],
        "includes": {
            "media": [
                { "media_key": "3_111", "type": "photo", "url": format!("{}/media/photo", server.uri()) }
            ],
            "users": [author_json()]
        },
        "meta": { "result_count": 2 }
    })
}

async fn mount_me(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/2/users/me"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(me_body()))
        .mount(server)
        .await;
}

fn options(dir: &Path) -> ExportOptions {
    ExportOptions {
        output_directory: dir.to_path_buf(),
        show_progress: false,
    }
}

fn zip_names(archive: &Path) -> Vec<String> {
    let file = File::open(archive).expect("archive exists");
    let mut zip = zip::ZipArchive::new(file).expect("valid zip");
    (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect()
}

#[tokio::test]
async fn test_export_writes_tree_and_archive() {
    let server = MockServer::start().await;
    mount_me(&server).await;

    Mock::given(method("GET"))
        .and(path("/2/users/100/bookmarks"))
        .and(query_param("expansions", "attachments.media_keys,author_id"))
        .and(query_param("tweet.fields", "entities,created_at,referenced_tweets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(single_page(&server)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/media/photo"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_body_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]),
        )
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let api = XApi::new(TOKEN.to_string(), &server.uri()).unwrap();

    let summary = export_bookmarks(&api, &BuiltinZip, &options(tmp.path()))
        .await
        .unwrap();

    assert_eq!(summary.handle, "jack");
    assert_eq!(summary.stats.bookmarks, 2);
    assert_eq!(summary.stats.media_files, 1);
    assert_eq!(summary.stats.quoted_posts, 0);

    let root = &summary.session_root;
    let root_name = root.file_name().unwrap().to_string_lossy().into_owned();
    assert!(root_name.starts_with("jack_"));
    assert_eq!(root.parent().unwrap(), tmp.path());

    let first = std::fs::read_to_string(root.join("10").join("tweet.md")).unwrap();
    assert!(first.starts_with("original_url:"));
    assert!(first.contains("https://twitter.com/jack/status/10"));
    assert!(first.contains("2024-01-02T03:04:05.000Z"));
    assert!(first.contains("writing at https://jack.example"));
    assert!(!first.contains("t.co/blog"));
    assert!(first.ends_with("---\nread this https://example.com/article"));

    let second = std::fs::read_to_string(root.join("11").join("tweet.md")).unwrap();
    assert!(!second.contains("created_at"));
    assert!(second.ends_with("---\nlook "));

    let image = std::fs::read(root.join("11").join("3_111.jpeg")).unwrap();
    assert_eq!(image, vec![0xFF, 0xD8, 0xFF, 0xE0]);

    assert_eq!(summary.archive, tmp.path().join(format!("{}.zip", root_name)));
    let names = zip_names(&summary.archive);
    assert!(names.contains(&"10/tweet.md".to_string()));
    assert!(names.contains(&"11/tweet.md".to_string()));
    assert!(names.contains(&"11/3_111.jpeg".to_string()));
}

#[tokio::test]
async fn test_export_follows_cursor_and_keeps_last_page() {
    let server = MockServer::start().await;
    mount_me(&server).await;

    let first = serde_json::json!({
        "data": [{ "id": "10", "author_id": "100", "text": "first" }],
        "includes": { "users": [author_json()] },
        "meta": { "result_count": 1, "next_token": "c1" }
    });
    let last = serde_json::json!({
        "data": [{ "id": "11", "author_id": "100", "text": "last" }],
        "includes": { "users": [author_json()] },
        "meta": { "result_count": 1 }
    });

    Mock::given(method("GET"))
        .and(path("/2/users/100/bookmarks"))
        .and(query_param("pagination_token", "c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(last))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/2/users/100/bookmarks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(first))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let api = XApi::new(TOKEN.to_string(), &server.uri()).unwrap();

    let summary = export_bookmarks(&api, &BuiltinZip, &options(tmp.path()))
        .await
        .unwrap();

    assert_eq!(summary.stats.bookmarks, 2);
    let last_md = std::fs::read_to_string(summary.session_root.join("11").join("tweet.md")).unwrap();
    assert!(last_md.ends_with("---\nlast"));
}

#[tokio::test]
async fn test_quoted_post_is_nested_under_parent() {
    let server = MockServer::start().await;
    mount_me(&server).await;

    let page = serde_json::json!({
        "data": [{
            "id": "30",
            "author_id": "100",
            "text": "agreed",
            "referenced_tweets": [
                { "type": "quoted", "id": "40" },
                { "type": "replied_to", "id": "41" }
            ]
        }],
        "includes": { "users": [author_json()] },
        "meta": { "result_count": 1 }
    });

    let quoted = serde_json::json!({
        "data": {
            "id": "40",
            "author_id": "200",
            "text": "hot take",
            "created_at": "2023-05-06T07:08:09.000Z",
            "referenced_tweets": [{ "type": "quoted", "id": "50" }]
        },
        "includes": {
            "users": [{ "id": "200", "username": "ev", "name": "Ev" }]
        }
    });

    Mock::given(method("GET"))
        .and(path("/2/users/100/bookmarks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/2/tweets/40"))
        .and(query_param("expansions", "attachments.media_keys,author_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(quoted))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let api = XApi::new(TOKEN.to_string(), &server.uri()).unwrap();

    let summary = export_bookmarks(&api, &BuiltinZip, &options(tmp.path()))
        .await
        .unwrap();

    assert_eq!(summary.stats.bookmarks, 1);
    assert_eq!(summary.stats.quoted_posts, 1);

    let nested = summary.session_root.join("30").join("40").join("tweet.md");
    let mut markdown = String::new();
    File::open(&nested)
        .unwrap()
        .read_to_string(&mut markdown)
        .unwrap();
    assert!(markdown.contains("https://twitter.com/ev/status/40"));
    assert!(markdown.contains("2023-05-06T07:08:09.000Z"));

    assert!(!summary.session_root.join("30").join("41").exists());
    assert!(!summary.session_root.join("30").join("40").join("50").exists());

    let names = zip_names(&summary.archive);
    assert!(names.contains(&"30/40/tweet.md".to_string()));
}

#[tokio::test]
async fn test_rejected_token_is_session_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let api = XApi::new(TOKEN.to_string(), &server.uri()).unwrap();

    let err = export_bookmarks(&api, &BuiltinZip, &options(tmp.path()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Session(_)));
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}
