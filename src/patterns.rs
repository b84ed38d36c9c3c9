//! Pattern template lookup.
//!
//! A pattern library is a directory of Fabric-style patterns, one
//! subdirectory per pattern holding a `system.md` prompt:
//!
//! ```text
//! patterns/
//!   summarize/system.md
//!   extract_wisdom/system.md
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

/// Name of the pattern used to generate pattern suggestions.
pub const SUGGEST_PATTERN: &str = "suggest_pattern";

/// System prompt used for suggestions when the library carries no
/// `suggest_pattern` template of its own.
pub const SUGGEST_PROMPT: &str = "\
You recommend Fabric patterns. Given a user request, reply with the three \
pattern names best suited to it, one per line, each followed by a short \
reason. Use exact pattern names such as summarize, extract_wisdom, \
analyze_claims, explain_code. No preamble, no closing remarks.";

/// A loaded pattern template.
#[derive(Debug, Clone)]
pub struct PatternTemplate {
    /// The pattern's name (its directory name).
    pub name: String,
    /// The system prompt from `system.md`.
    pub system: String,
}

/// Errors from pattern lookup.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// No template exists for the requested name.
    #[error("pattern not found: {name}")]
    NotFound {
        /// The requested pattern name.
        name: String,
    },
    /// Reading the library failed.
    #[error("failed to read pattern library at {path}: {source}")]
    Io {
        /// The path being read.
        path: String,
        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
}

/// Filesystem-backed pattern library.
pub struct PatternLibrary {
    root: PathBuf,
}

impl PatternLibrary {
    /// Create a library rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The library's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the template for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::NotFound`] when no such pattern exists
    /// (including names that try to escape the library root) and
    /// [`PatternError::Io`] for other read failures.
    pub fn find(&self, name: &str) -> Result<PatternTemplate, PatternError> {
        if !is_valid_name(name) {
            return Err(PatternError::NotFound {
                name: name.to_owned(),
            });
        }

        let path = self.root.join(name).join("system.md");
        debug!(pattern = name, path = %path.display(), "loading pattern template");
        match std::fs::read_to_string(&path) {
            Ok(system) => Ok(PatternTemplate {
                name: name.to_owned(),
                system,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(PatternError::NotFound {
                name: name.to_owned(),
            }),
            Err(source) => Err(PatternError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// List every pattern in the library, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Io`] when the library root cannot be
    /// read.
    pub fn list(&self) -> Result<Vec<String>, PatternError> {
        let entries = std::fs::read_dir(&self.root).map_err(|source| PatternError::Io {
            path: self.root.display().to_string(),
            source,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| PatternError::Io {
                path: self.root.display().to_string(),
                source,
            })?;
            let path = entry.path();
            if path.join("system.md").is_file() {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_owned());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

// Pattern names never contain separators; anything else is a lookup
// escape attempt, not a pattern.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
}
