//! YouTube transcript loader.
//!
//! The watch page embeds a player config JSON whose `captionTracks`
//! array carries a `baseUrl` per caption track; fetching that URL
//! returns timedtext XML. No API key is involved, so videos without
//! published captions simply fail.

use async_trait::async_trait;
use tracing::debug;

use super::loader::{ContentLoader, LoadError};
use super::SourceKind;

/// Fetches the caption transcript of a YouTube video.
pub struct YoutubeLoader {
    client: reqwest::Client,
}

impl YoutubeLoader {
    /// Create a loader using `client` for requests.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch(&self, url: &str) -> Result<String, LoadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| LoadError::Http {
                url: url.to_owned(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_owned(),
                status,
            });
        }

        response.text().await.map_err(|source| LoadError::Http {
            url: url.to_owned(),
            source,
        })
    }
}

#[async_trait]
impl ContentLoader for YoutubeLoader {
    fn kind(&self) -> SourceKind {
        SourceKind::Youtube
    }

    async fn load(&self, reference: &str) -> Result<String, LoadError> {
        debug!(url = %reference, "fetching watch page");
        let page = self.fetch(reference).await?;

        let caption_url = caption_track_url(&page).ok_or_else(|| LoadError::Extract {
            reference: reference.to_owned(),
            reason: "no caption tracks published for this video".to_owned(),
        })?;

        debug!(url = %caption_url, "fetching caption track");
        let xml = self.fetch(&caption_url).await?;

        let transcript = transcript_text(&xml);
        if transcript.is_empty() {
            return Err(LoadError::Extract {
                reference: reference.to_owned(),
                reason: "caption track contained no text".to_owned(),
            });
        }
        Ok(transcript)
    }
}

/// Pull the first caption track's `baseUrl` out of the watch page.
fn caption_track_url(page: &str) -> Option<String> {
    let (_, tracks) = page.split_once("\"captionTracks\":")?;
    let (_, after_key) = tracks.split_once("\"baseUrl\":\"")?;
    let (url, _) = after_key.split_once('"')?;
    Some(url.replace("\\u0026", "&"))
}

/// Flatten timedtext XML (`<text start=..>segment</text>` entries)
/// into one line of plain text.
fn transcript_text(xml: &str) -> String {
    let mut segments = Vec::new();
    for chunk in xml.split("<text").skip(1) {
        let Some((_, rest)) = chunk.split_once('>') else {
            continue;
        };
        let Some((content, _)) = rest.split_once("</text>") else {
            continue;
        };
        let decoded = decode_entities(content);
        let trimmed = decoded.trim();
        if !trimmed.is_empty() {
            segments.push(trimmed.to_owned());
        }
    }
    segments.join(" ")
}

// Timedtext double-encodes, so `&amp;` must go first.
fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
}
