//! Source references: parsing, normalization, and content loading.
//!
//! A source is written `prefix:argument` — `yt:dQw4w9WgXcQ`,
//! `pdf:~/papers/attention.pdf`, `github:rust-lang/rust`,
//! `url:https://example.com/post`, `file:./notes.md`. Parsing splits the
//! prefix, [`normalize`](normalize::normalize) canonicalizes the
//! argument into the shape the kind's loader expects, and a
//! [`ContentLoader`](loader::ContentLoader) registered for the kind
//! turns the canonical reference into text.

use std::fmt;

pub mod file;
pub mod github;
pub mod loader;
pub mod normalize;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod web;
pub mod youtube;

/// The kind of content source, identified by its reference prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Local text file (`file:`).
    File,
    /// YouTube transcript (`yt:`).
    Youtube,
    /// PDF document, local or remote (`pdf:`).
    Pdf,
    /// GitHub repository (`github:`).
    Github,
    /// Web page (`url:`).
    Url,
}

impl SourceKind {
    /// All kinds, in the order they are documented to callers.
    pub const ALL: &'static [SourceKind] = &[
        SourceKind::File,
        SourceKind::Youtube,
        SourceKind::Pdf,
        SourceKind::Github,
        SourceKind::Url,
    ];

    /// Parse a (case-insensitive) reference prefix into a kind.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix.to_lowercase().as_str() {
            "file" => Some(Self::File),
            "yt" => Some(Self::Youtube),
            "pdf" => Some(Self::Pdf),
            "github" => Some(Self::Github),
            "url" => Some(Self::Url),
            _ => None,
        }
    }

    /// The canonical reference prefix for this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Youtube => "yt",
            Self::Pdf => "pdf",
            Self::Github => "github",
            Self::Url => "url",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A parsed (but not yet normalized) source reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    /// The source kind derived from the prefix.
    pub kind: SourceKind,
    /// The raw argument after the first `:`.
    pub argument: String,
}

impl SourceRef {
    /// Parse a `prefix:argument` reference.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidFormat`] when the delimiter is
    /// missing and [`SourceError::UnknownPrefix`] for an unrecognized
    /// prefix.
    pub fn parse(raw: &str) -> Result<Self, SourceError> {
        let (prefix, argument) = raw.split_once(':').ok_or_else(|| {
            SourceError::InvalidFormat {
                source: raw.to_owned(),
            }
        })?;

        let kind = SourceKind::from_prefix(prefix).ok_or_else(|| SourceError::UnknownPrefix {
            prefix: prefix.to_owned(),
        })?;

        Ok(Self {
            kind,
            argument: argument.to_owned(),
        })
    }
}

/// Errors from source parsing and normalization.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The reference is missing the `prefix:argument` delimiter.
    #[error(
        "invalid source format: {source}. Expected prefix:argument \
         (e.g. yt:VIDEO_ID, pdf:/path/to/file)"
    )]
    InvalidFormat {
        /// The raw reference as given (not an error cause; the raw
        /// identifier opts out of thiserror's source inference).
        r#source: String,
    },
    /// The prefix is not one of the supported kinds.
    #[error("unknown source prefix: {prefix}. Supported: file, yt, pdf, github, url")]
    UnknownPrefix {
        /// The unrecognized prefix.
        prefix: String,
    },
    /// The argument cannot be interpreted for its kind.
    #[error("invalid {kind} reference '{argument}': {reason}")]
    InvalidReference {
        /// The kind the argument was parsed for.
        kind: SourceKind,
        /// The offending argument.
        argument: String,
        /// Why it was rejected.
        reason: String,
    },
}
