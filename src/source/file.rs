//! Local file loader.

use async_trait::async_trait;
use tracing::debug;

use super::loader::{ContentLoader, LoadError};
use super::normalize::expand_home;
use super::SourceKind;

/// Reads local text files, expanding a leading `~`.
pub struct FileLoader;

impl FileLoader {
    /// Create a new file loader.
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentLoader for FileLoader {
    fn kind(&self) -> SourceKind {
        SourceKind::File
    }

    async fn load(&self, reference: &str) -> Result<String, LoadError> {
        let path = expand_home(reference);
        debug!(path = %path, "reading local file");
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(LoadError::NotFound { path })
            }
            Err(source) => Err(LoadError::Io { path, source }),
        }
    }
}
