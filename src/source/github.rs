//! GitHub repository loader.
//!
//! Downloads the repository's default-branch tarball from codeload and
//! concatenates its text files, each prefixed with its path. Binary
//! files, oversized files, and anything past the total budget are
//! skipped so one large repository cannot swamp a prompt.

use std::io::Read;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::loader::{ContentLoader, LoadError};
use super::SourceKind;

/// Largest tarball we are willing to buffer.
const MAX_ARCHIVE_BYTES: usize = 50 * 1024 * 1024;
/// Largest single file included in the output.
const MAX_FILE_BYTES: u64 = 64 * 1024;
/// Output budget across all files.
const MAX_TOTAL_BYTES: usize = 512 * 1024;

const TEXT_EXTENSIONS: &[&str] = &[
    "md", "txt", "rst", "rs", "py", "js", "ts", "go", "java", "c", "h", "cpp", "hpp", "rb",
    "toml", "yaml", "yml", "json", "sh", "html", "css", "sql", "cfg", "ini",
];

const TEXT_FILENAMES: &[&str] = &["README", "LICENSE", "Makefile", "Dockerfile"];

/// Fetches a repository snapshot and flattens it to text.
pub struct GithubLoader {
    client: reqwest::Client,
}

impl GithubLoader {
    /// Create a loader using `client` for requests.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentLoader for GithubLoader {
    fn kind(&self) -> SourceKind {
        SourceKind::Github
    }

    async fn load(&self, reference: &str) -> Result<String, LoadError> {
        let url = format!("https://codeload.github.com/{reference}/tar.gz/HEAD");
        debug!(url = %url, "downloading repository tarball");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| LoadError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status { url, status });
        }

        let bytes = response.bytes().await.map_err(|source| LoadError::Http {
            url: url.clone(),
            source,
        })?;
        if bytes.len() > MAX_ARCHIVE_BYTES {
            return Err(LoadError::Extract {
                reference: reference.to_owned(),
                reason: format!("archive exceeds {MAX_ARCHIVE_BYTES} bytes"),
            });
        }

        archive_text(&bytes, reference)
    }
}

/// Walk the tarball and concatenate its text files.
fn archive_text(bytes: &[u8], reference: &str) -> Result<String, LoadError> {
    let decoder = flate2::read::GzDecoder::new(bytes);
    let mut archive = tar::Archive::new(decoder);

    let entries = archive.entries().map_err(|e| LoadError::Extract {
        reference: reference.to_owned(),
        reason: format!("failed to read tarball: {e}"),
    })?;

    let mut output = String::new();
    let mut included = 0usize;
    for entry_result in entries {
        let mut entry = entry_result.map_err(|e| LoadError::Extract {
            reference: reference.to_owned(),
            reason: format!("failed to read tar entry: {e}"),
        })?;

        if entry.header().entry_type() != tar::EntryType::Regular {
            continue;
        }
        if entry.header().size().unwrap_or(0) > MAX_FILE_BYTES {
            continue;
        }

        // Archives carry a `repo-HEAD/` root directory; drop it.
        let Ok(path) = entry.path() else { continue };
        let relative: PathBuf = path.components().skip(1).collect();
        if !is_text_path(&relative) {
            continue;
        }

        let mut text = String::new();
        if entry.read_to_string(&mut text).is_err() {
            // Not UTF-8 despite the extension, skip it.
            continue;
        }

        let section = format!("--- {} ---\n{}\n\n", relative.display(), text.trim_end());
        if output.len().saturating_add(section.len()) > MAX_TOTAL_BYTES {
            break;
        }
        output.push_str(&section);
        included = included.saturating_add(1);
    }

    if output.is_empty() {
        return Err(LoadError::Extract {
            reference: reference.to_owned(),
            reason: "no text files found in repository".to_owned(),
        });
    }

    debug!(repo = reference, files = included, "flattened repository");
    Ok(output)
}

fn is_text_path(path: &std::path::Path) -> bool {
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        return TEXT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str());
    }
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| TEXT_FILENAMES.contains(&name))
}
