//! PDF document loader (feature-gated).
//!
//! Local documents are extracted in place. Remote documents are
//! downloaded into a [`tempfile::NamedTempFile`], whose drop removes
//! the file on every exit path, success or error.

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use super::loader::{ContentLoader, LoadError};
use super::normalize::{expand_home, has_scheme};
use super::SourceKind;

/// Extracts text from local or remote PDF documents.
pub struct PdfLoader {
    client: reqwest::Client,
}

impl PdfLoader {
    /// Create a loader using `client` for remote documents.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn load_remote(&self, url: &str) -> Result<String, LoadError> {
        debug!(url = %url, "downloading remote document");
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

        let bytes = response.bytes().await.map_err(|source| LoadError::Http {
            url: url.to_owned(),
            source,
        })?;

        let temp = tempfile::NamedTempFile::new().map_err(|source| LoadError::Io {
            path: "temporary download".to_owned(),
            source,
        })?;
        std::fs::write(temp.path(), &bytes).map_err(|source| LoadError::Io {
            path: temp.path().display().to_string(),
            source,
        })?;
        extract(temp.path(), url)
    }

    fn load_local(&self, reference: &str) -> Result<String, LoadError> {
        let path = expand_home(reference);
        if !Path::new(&path).exists() {
            return Err(LoadError::NotFound { path });
        }
        extract(Path::new(&path), reference)
    }
}

#[async_trait]
impl ContentLoader for PdfLoader {
    fn kind(&self) -> SourceKind {
        SourceKind::Pdf
    }

    async fn load(&self, reference: &str) -> Result<String, LoadError> {
        if has_scheme(reference) {
            self.load_remote(reference).await
        } else {
            self.load_local(reference)
        }
    }
}

fn extract(path: &Path, reference: &str) -> Result<String, LoadError> {
    let text = pdf_extract::extract_text(path).map_err(|e| LoadError::Extract {
        reference: reference.to_owned(),
        reason: e.to_string(),
    })?;

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(LoadError::Extract {
            reference: reference.to_owned(),
            reason: "document contains no extractable text".to_owned(),
        });
    }
    Ok(trimmed.to_owned())
}
