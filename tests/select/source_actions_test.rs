//! Source-kind action tables: precedence over global rules, sentinels.

use weft::select::select_pattern;
use weft::source::SourceKind;

#[test]
fn youtube_source_needs_no_transcript_hint() {
    // Globally this task needs a transcript marker in the input; a
    // declared YouTube source is evidence enough on its own.
    assert_eq!(select_pattern("create chapters with timestamps", "", None), None);
    assert_eq!(
        select_pattern(
            "create chapters with timestamps",
            "",
            Some(SourceKind::Youtube)
        ),
        Some("create_video_chapters")
    );
}

#[test]
fn first_matching_action_wins() {
    // "summarize" sits above "chapters" in the YouTube table.
    assert_eq!(
        select_pattern("summarize the chapters", "", Some(SourceKind::Youtube)),
        Some("youtube_summary")
    );
}

#[test]
fn sentinel_default_applies_when_no_action_keyword_matches() {
    assert_eq!(
        select_pattern("what is this about", "", Some(SourceKind::Youtube)),
        Some("youtube_summary")
    );
    assert_eq!(
        select_pattern("what is this about", "", Some(SourceKind::Pdf)),
        Some("summarize_paper")
    );
}

#[test]
fn pdf_actions_route_between_summary_and_analysis() {
    assert_eq!(
        select_pattern("analyze the methodology", "", Some(SourceKind::Pdf)),
        Some("analyze_paper")
    );
    assert_eq!(
        select_pattern("zusammenfassen bitte", "", Some(SourceKind::Pdf)),
        Some("summarize_paper")
    );
}

#[test]
fn kinds_without_tables_fall_through_to_global_rules() {
    for kind in [SourceKind::File, SourceKind::Github, SourceKind::Url] {
        assert_eq!(
            select_pattern("summarize this", "", Some(kind)),
            Some("summarize"),
            "{kind:?}"
        );
        assert_eq!(
            select_pattern("rewrite this in Latin", "", Some(kind)),
            None,
            "{kind:?}"
        );
    }
}
