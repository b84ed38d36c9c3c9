//! The content-loading seam.
//!
//! Each [`SourceKind`] gets one [`ContentLoader`] implementation; the
//! [`LoaderRegistry`] hands the runner the loader for a kind, or
//! nothing when that kind was not wired in (a registry with no PDF
//! loader simply reports the source as unavailable).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::SourceKind;

/// Errors surfaced by content loaders.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A local path does not exist.
    #[error("file not found: {path}")]
    NotFound {
        /// The path that was checked.
        path: String,
    },
    /// Reading from the filesystem failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path being read.
        path: String,
        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
    /// The HTTP request itself failed.
    #[error("request to {url} failed: {source}")]
    Http {
        /// The URL being fetched.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// The URL being fetched.
        url: String,
        /// The response status code.
        status: reqwest::StatusCode,
    },
    /// Fetched bytes could not be turned into usable text.
    #[error("could not extract text from {reference}: {reason}")]
    Extract {
        /// The canonical reference being loaded.
        reference: String,
        /// Why extraction failed.
        reason: String,
    },
}

/// Turns a canonical source reference into plain text.
///
/// Implementations receive references already shaped by
/// [`normalize`](super::normalize::normalize) and never need to guess
/// at argument forms.
#[async_trait]
pub trait ContentLoader: Send + Sync {
    /// The source kind this loader serves.
    fn kind(&self) -> SourceKind;

    /// Fetch `reference` and return its content as text.
    async fn load(&self, reference: &str) -> Result<String, LoadError>;
}

/// Loaders keyed by the source kind they serve.
pub struct LoaderRegistry {
    loaders: HashMap<SourceKind, Arc<dyn ContentLoader>>,
}

impl LoaderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            loaders: HashMap::new(),
        }
    }

    /// Create a registry with every built-in loader, sharing `client`
    /// for the kinds that fetch over HTTP.
    pub fn with_defaults(client: reqwest::Client) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(super::file::FileLoader::new()));
        registry.register(Arc::new(super::web::WebLoader::new(client.clone())));
        registry.register(Arc::new(super::youtube::YoutubeLoader::new(client.clone())));
        registry.register(Arc::new(super::github::GithubLoader::new(client.clone())));
        #[cfg(feature = "pdf")]
        registry.register(Arc::new(super::pdf::PdfLoader::new(client)));
        registry
    }

    /// Register a loader under its own kind, replacing any previous
    /// loader for that kind.
    pub fn register(&mut self, loader: Arc<dyn ContentLoader>) {
        self.loaders.insert(loader.kind(), loader);
    }

    /// Look up the loader for `kind`.
    pub fn get(&self, kind: SourceKind) -> Option<Arc<dyn ContentLoader>> {
        self.loaders.get(&kind).cloned()
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
