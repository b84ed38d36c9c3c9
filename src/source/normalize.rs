//! Canonicalization of source arguments.
//!
//! Loaders expect exactly one argument shape per kind (full URL,
//! `owner/repo`, filesystem path). Everything here absorbs the looser
//! forms people actually type: bare video ids, host-only URLs, browser
//! URLs with extra path segments, `~/` paths.

use std::path::Path;

use directories::BaseDirs;

use super::{SourceError, SourceKind};

/// Hosts recognized as YouTube when the argument carries no scheme.
const YOUTUBE_HOSTS: &[&str] = &[
    "www.youtube.com",
    "youtube.com",
    "m.youtube.com",
    "music.youtube.com",
    "youtu.be",
];

/// Canonicalize `argument` for `kind`.
///
/// Idempotent for already-canonical input: a schemed URL, an
/// `owner/repo` pair, or an absolute path normalizes to itself.
///
/// # Errors
///
/// Returns [`SourceError::InvalidReference`] when the argument cannot
/// be interpreted for its kind (empty argument, malformed repository
/// path, unrecognizable video reference).
pub fn normalize(kind: SourceKind, argument: &str) -> Result<String, SourceError> {
    let argument = argument.trim();
    if argument.is_empty() {
        return Err(SourceError::InvalidReference {
            kind,
            argument: argument.to_owned(),
            reason: "empty argument".to_owned(),
        });
    }

    match kind {
        SourceKind::File => Ok(argument.to_owned()),
        SourceKind::Url => Ok(normalize_url(argument)),
        SourceKind::Github => normalize_github(argument),
        SourceKind::Youtube => normalize_youtube(argument),
        SourceKind::Pdf => Ok(normalize_document(argument)),
    }
}

fn normalize_url(argument: &str) -> String {
    if has_scheme(argument) {
        argument.to_owned()
    } else {
        format!("https://{argument}")
    }
}

/// Reduce any of `owner/repo`, `github.com/owner/repo`, or a full
/// browser URL (with or without `.git`, with or without trailing
/// `/tree/...` segments) to `owner/repo`.
fn normalize_github(argument: &str) -> Result<String, SourceError> {
    let path = strip_scheme(argument);
    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    // A dotted first segment is a host label, never a GitHub owner.
    if segments.first().is_some_and(|s| s.contains('.')) {
        segments.remove(0);
    }

    let [owner, name, ..] = segments.as_slice() else {
        return Err(SourceError::InvalidReference {
            kind: SourceKind::Github,
            argument: argument.to_owned(),
            reason: "expected owner/repo".to_owned(),
        });
    };
    let name = name.strip_suffix(".git").unwrap_or(name);
    Ok(format!("{owner}/{name}"))
}

fn normalize_youtube(argument: &str) -> Result<String, SourceError> {
    if has_scheme(argument) {
        return Ok(argument.to_owned());
    }

    let on_known_host = YOUTUBE_HOSTS.iter().any(|host| {
        argument
            .strip_prefix(host)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    });
    if on_known_host {
        return Ok(format!("https://{argument}"));
    }

    if is_video_id(argument) {
        return Ok(format!("https://www.youtube.com/watch?v={argument}"));
    }

    Err(SourceError::InvalidReference {
        kind: SourceKind::Youtube,
        argument: argument.to_owned(),
        reason: "expected a watch URL, a youtube.com/youtu.be path, or a bare video id"
            .to_owned(),
    })
}

/// Classify a document argument as remote or local.
///
/// Checks run in order: an explicit scheme wins, then explicit path
/// markers, then existence on disk, then a bare filename, and only
/// then is a dotted first segment read as a domain.
fn normalize_document(argument: &str) -> String {
    if has_scheme(argument) {
        return argument.to_owned();
    }

    if argument.starts_with('/')
        || argument.starts_with("./")
        || argument.starts_with("../")
        || argument.starts_with('~')
    {
        return expand_home(argument);
    }

    let expanded = expand_home(argument);
    if Path::new(&expanded).exists() {
        return expanded;
    }

    match argument.split_once('/') {
        None => expanded,
        Some((first, _)) if looks_like_domain(first) => normalize_url(argument),
        Some(_) => expanded,
    }
}

/// A segment reads as a domain when it has a dot with a non-empty
/// label before it (`example.com` yes, `.hidden` no).
fn looks_like_domain(segment: &str) -> bool {
    segment
        .split_once('.')
        .is_some_and(|(label, _)| !label.is_empty())
}

fn is_video_id(candidate: &str) -> bool {
    (10..=12).contains(&candidate.len())
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
}

pub(crate) fn has_scheme(argument: &str) -> bool {
    argument.split_once("://").is_some_and(|(scheme, _)| {
        let mut chars = scheme.chars();
        chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

fn strip_scheme(argument: &str) -> &str {
    if has_scheme(argument) {
        argument
            .split_once("://")
            .map_or(argument, |(_, rest)| rest)
    } else {
        argument
    }
}

/// Resolve a leading `~` or `~/` against the user's home directory.
///
/// Unexpandable paths (no home directory available) pass through
/// unchanged.
pub fn expand_home(path: &str) -> String {
    if path == "~" {
        if let Some(dirs) = BaseDirs::new() {
            return dirs.home_dir().to_string_lossy().into_owned();
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(dirs) = BaseDirs::new() {
            return dirs.home_dir().join(rest).to_string_lossy().into_owned();
        }
    }
    path.to_owned()
}
