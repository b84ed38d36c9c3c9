//! Web loader tests against a local one-shot server.

use weft::source::loader::{ContentLoader, LoadError};
use weft::source::web::WebLoader;

use crate::http_fixture::serve_once;

#[tokio::test]
async fn loads_title_and_article_blocks() {
    let html = "<html><head><title>Release Notes</title></head><body>\
                <nav><p>navigation junk</p></nav>\
                <article><p>The  first   change.</p><ul><li>A bullet</li></ul></article>\
                </body></html>";
    let url = serve_once("200 OK", html).await;

    let loader = WebLoader::new(reqwest::Client::new());
    let text = loader.load(&url).await.expect("should load");

    assert!(text.starts_with("Release Notes"), "{text}");
    assert!(text.contains("The first change."), "{text}");
    assert!(text.contains("A bullet"), "{text}");
    assert!(!text.contains("navigation junk"), "{text}");
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let url = serve_once("404 Not Found", "gone").await;

    let loader = WebLoader::new(reqwest::Client::new());
    let err = loader.load(&url).await.expect_err("should fail");
    match err {
        LoadError::Status { status, .. } => assert_eq!(status.as_u16(), 404),
        other => panic!("expected status error, got {other}"),
    }
}

#[tokio::test]
async fn textless_pages_fail_extraction() {
    let url = serve_once("200 OK", "<html><body><img src=\"x.png\"></body></html>").await;

    let loader = WebLoader::new(reqwest::Client::new());
    let err = loader.load(&url).await.expect_err("should fail");
    assert!(matches!(err, LoadError::Extract { .. }), "{err}");
}
