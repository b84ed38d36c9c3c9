//! Web page loader.
//!
//! Fetches a page and reduces it to readable text: page title plus the
//! paragraph and list-item blocks of the main content region.

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::debug;

use super::loader::{ContentLoader, LoadError};
use super::SourceKind;

/// Fetches web pages and extracts their readable text.
pub struct WebLoader {
    client: reqwest::Client,
}

impl WebLoader {
    /// Create a loader using `client` for requests.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentLoader for WebLoader {
    fn kind(&self) -> SourceKind {
        SourceKind::Url
    }

    async fn load(&self, reference: &str) -> Result<String, LoadError> {
        debug!(url = %reference, "fetching web page");
        let response = self
            .client
            .get(reference)
            .send()
            .await
            .map_err(|source| LoadError::Http {
                url: reference.to_owned(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: reference.to_owned(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| LoadError::Http {
            url: reference.to_owned(),
            source,
        })?;

        let text = readable_text(&body);
        if text.is_empty() {
            return Err(LoadError::Extract {
                reference: reference.to_owned(),
                reason: "page yielded no readable text".to_owned(),
            });
        }
        Ok(text)
    }
}

/// Reduce an HTML document to title plus content blocks.
///
/// The content region is the first of `article`, `main`, `body` that
/// exists; blocks are its `p` and `li` elements with whitespace
/// compacted. A page with no block structure falls back to the whole
/// document's text.
fn readable_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let title = Selector::parse("title")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .map(|el| compact_ws(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty());

    let root = Selector::parse("article")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .or_else(|| {
            Selector::parse("main")
                .ok()
                .and_then(|sel| document.select(&sel).next())
        })
        .or_else(|| {
            Selector::parse("body")
                .ok()
                .and_then(|sel| document.select(&sel).next())
        });

    let mut blocks: Vec<String> = Vec::new();
    if let (Some(root), Ok(block_sel)) = (root, Selector::parse("p, li")) {
        for elem in root.select(&block_sel) {
            let text = compact_ws(&elem.text().collect::<String>());
            if !text.is_empty() {
                blocks.push(text);
            }
        }
    }

    let body = if blocks.is_empty() {
        compact_ws(&document.root_element().text().collect::<String>())
    } else {
        blocks.join("\n\n")
    };

    match title {
        Some(title) if !body.is_empty() => format!("{title}\n\n{body}"),
        Some(title) => title,
        None => body,
    }
}

fn compact_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
