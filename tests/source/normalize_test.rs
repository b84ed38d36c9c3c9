//! Reference normalization across raw caller-supplied forms.

use weft::source::normalize::normalize;
use weft::source::{SourceError, SourceKind};

#[test]
fn raw_forms_reach_a_fixed_point_in_one_step() {
    let cases = [
        (SourceKind::Url, "example.com/post"),
        (SourceKind::Github, "https://github.com/rust-lang/rust.git"),
        (SourceKind::Youtube, "dQw4w9WgXcQ"),
        (SourceKind::Youtube, "youtu.be/dQw4w9WgXcQ"),
        (SourceKind::Pdf, "arxiv.org/pdf/1706.03762"),
        (SourceKind::File, "notes.md"),
    ];
    for (kind, raw) in cases {
        let once = normalize(kind, raw).expect("should normalize");
        let twice = normalize(kind, &once).expect("canonical form should normalize");
        assert_eq!(once, twice, "{kind}: {raw}");
    }
}

#[test]
fn repository_case_is_preserved() {
    assert_eq!(
        normalize(SourceKind::Github, "GitHub.com/Apache/Arrow").expect("should normalize"),
        "Apache/Arrow"
    );
}

#[test]
fn video_id_length_bounds_are_inclusive() {
    assert_eq!(
        normalize(SourceKind::Youtube, "abcdefghij").expect("10 chars should pass"),
        "https://www.youtube.com/watch?v=abcdefghij"
    );
    assert_eq!(
        normalize(SourceKind::Youtube, "abcdefghij-_").expect("12 chars should pass"),
        "https://www.youtube.com/watch?v=abcdefghij-_"
    );
    assert!(normalize(SourceKind::Youtube, "abcdefghij-_x").is_err());
    assert!(normalize(SourceKind::Youtube, "abcd!fghijk").is_err());
}

#[test]
fn schemed_video_arguments_are_trusted_as_given() {
    // Anything with a scheme is passed through untouched; bad hosts
    // surface as load failures, not normalization failures.
    assert_eq!(
        normalize(SourceKind::Youtube, "https://vimeo.com/12345").expect("should pass through"),
        "https://vimeo.com/12345"
    );
}

#[test]
fn known_video_hosts_gain_a_scheme() {
    for raw in [
        "www.youtube.com/watch?v=dQw4w9WgXcQ",
        "m.youtube.com/watch?v=dQw4w9WgXcQ",
        "music.youtube.com/watch?v=dQw4w9WgXcQ",
    ] {
        let canonical = normalize(SourceKind::Youtube, raw).expect("should normalize");
        assert_eq!(canonical, format!("https://{raw}"), "raw: {raw}");
    }
}

#[test]
fn tilde_documents_expand_to_the_home_directory() {
    let expanded = normalize(SourceKind::Pdf, "~/papers/attention.pdf").expect("should normalize");
    assert!(expanded.ends_with("/papers/attention.pdf"), "{expanded}");
    assert!(!expanded.starts_with('~'), "{expanded}");
}

#[test]
fn lone_dotted_names_are_files_not_hosts() {
    // No path separator at all reads as a filename, even when the name
    // could pass for a host.
    assert_eq!(
        normalize(SourceKind::Pdf, "example.com").expect("should normalize"),
        "example.com"
    );
}

#[test]
fn existing_relative_paths_beat_domain_classification() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    std::fs::create_dir_all(dir.path().join("example.com")).expect("should create dir");
    std::fs::write(dir.path().join("example.com/paper.pdf"), b"x").expect("should write file");

    let previous = std::env::current_dir().expect("should read cwd");
    std::env::set_current_dir(dir.path()).expect("should enter temp dir");
    let result = normalize(SourceKind::Pdf, "example.com/paper.pdf");
    std::env::set_current_dir(previous).expect("should restore cwd");

    assert_eq!(result.expect("should normalize"), "example.com/paper.pdf");
}

#[test]
fn invalid_reference_errors_name_the_kind_and_argument() {
    let err = normalize(SourceKind::Youtube, "nope").expect_err("should reject");
    assert!(err.to_string().contains("yt"), "{err}");
    match err {
        SourceError::InvalidReference { kind, argument, .. } => {
            assert_eq!(kind, SourceKind::Youtube);
            assert_eq!(argument, "nope");
        }
        other => panic!("expected invalid reference, got {other}"),
    }
}
