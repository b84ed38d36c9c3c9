//! Global rule matching: keyword semantics, hint windows, precedence.

use weft::select::{select_pattern, CONTENT_HINT_WINDOW};

#[test]
fn hintless_rules_require_every_keyword() {
    assert_eq!(
        select_pattern("explain this code", "", None),
        Some("explain_code")
    );
    // One keyword alone is not enough.
    assert_eq!(select_pattern("explain this function", "", None), None);
    assert_eq!(select_pattern("what does this code do", "", None), None);
}

#[test]
fn matching_is_case_insensitive_substring() {
    assert_eq!(select_pattern("SUMMARIZE THIS", "", None), Some("summarize"));
    // German stems cover their inflected forms.
    assert_eq!(
        select_pattern("bitte zusammenfassen", "", None),
        Some("summarize")
    );
}

#[test]
fn hinted_rules_need_one_keyword_and_one_hint() {
    // Keyword without a transcript marker in the input: no hinted rule
    // fires, and no hint-less rule covers "wisdom" either.
    assert_eq!(
        select_pattern("extract the wisdom", "plain article text", None),
        None
    );

    let transcript = "Video from https://youtu.be/dQw4w9WgXcQ\nWelcome back everyone";
    assert_eq!(
        select_pattern("extract the wisdom", transcript, None),
        Some("extract_wisdom")
    );
}

#[test]
fn declaration_order_breaks_ties() {
    // Both the youtube_summary and extract_wisdom hinted rules match
    // this task; the rule declared first wins.
    let transcript = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
    assert_eq!(
        select_pattern("summarize the video wisdom", transcript, None),
        Some("youtube_summary")
    );
}

#[test]
fn hints_only_count_inside_the_scan_window() {
    let pad = CONTENT_HINT_WINDOW.saturating_sub("youtu.be".len());
    let inside = format!("{}youtu.be", "x".repeat(pad));
    assert_eq!(
        select_pattern("wisdom", &inside, None),
        Some("extract_wisdom")
    );

    // One character later the marker straddles the window edge.
    let straddling = format!("{}youtu.be", "x".repeat(pad.saturating_add(1)));
    assert_eq!(select_pattern("wisdom", &straddling, None), None);

    // Starting exactly at the edge leaves it entirely outside.
    let outside = format!("{}youtu.be", "x".repeat(CONTENT_HINT_WINDOW));
    assert_eq!(select_pattern("wisdom", &outside, None), None);
}

#[test]
fn video_tasks_without_transcript_markers_fall_back_to_summarize() {
    assert_eq!(
        select_pattern("summarize the video", "plain article text", None),
        Some("summarize")
    );
}

#[test]
fn security_rules_match_in_both_languages() {
    assert_eq!(
        select_pattern("analyze this threat report for security issues", "", None),
        Some("analyze_threat_report")
    );
    assert_eq!(
        select_pattern(
            "analysiere den Bericht zur Bedrohungslage auf Sicherheitslücken",
            "",
            None
        ),
        Some("analyze_threat_report")
    );
}

#[test]
fn unmatched_tasks_select_nothing() {
    assert_eq!(select_pattern("translate this to French", "", None), None);
}
