//! Static pattern-selection rule data. No logic lives here.
//!
//! Declaration order is priority order: the selector walks these slices
//! top to bottom and the first matching entry wins. Keywords and hints
//! are lowercase; the selector lowercases the task and input before
//! comparing. English and German keyword variants sit side by side —
//! substring matching doubles as cheap stemming for both languages
//! ("extract" covers "extraction", "zusammenfass" covers
//! "zusammenfassen" and "Zusammenfassung").

use crate::source::SourceKind;

/// A global auto-selection rule.
///
/// Rules without hints require every keyword to appear in the task.
/// Rules with hints require any keyword in the task *and* any hint in
/// the scanned input window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Keywords checked against the task description.
    pub keywords: &'static [&'static str],
    /// Substrings checked against the start of the input content.
    pub hints: &'static [&'static str],
    /// Pattern selected when the rule matches.
    pub pattern: &'static str,
}

/// An action entry in a source kind's table.
///
/// An empty keyword marks the sentinel default for the kind, used when
/// no keyword action matches the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceAction {
    /// Action keyword checked against the task description.
    pub keyword: &'static str,
    /// Pattern selected for this action.
    pub pattern: &'static str,
}

impl SourceAction {
    /// Whether this entry is the sentinel default for its kind.
    pub fn is_default(&self) -> bool {
        self.keyword.is_empty()
    }
}

/// Content hints identifying YouTube-derived input.
const YOUTUBE_HINTS: &[&str] = &["youtube.com", "youtu.be"];

/// The global rule table, ordered specific to general.
///
/// The bare `summarize` rules must stay last: nearly every summarization
/// task contains that word, and anything above would be shadowed.
pub const AUTO_SELECT_RULES: &[Rule] = &[
    // YouTube-specific patterns (EN + DE), gated on transcript hints.
    Rule {
        keywords: &["youtube", "video", "summarize"],
        hints: YOUTUBE_HINTS,
        pattern: "youtube_summary",
    },
    Rule {
        keywords: &["youtube", "video", "zusammenfass"],
        hints: YOUTUBE_HINTS,
        pattern: "youtube_summary",
    },
    Rule {
        keywords: &["wisdom", "insights", "extract"],
        hints: YOUTUBE_HINTS,
        pattern: "extract_wisdom",
    },
    Rule {
        keywords: &["weisheit", "erkenntnisse", "extrahier"],
        hints: YOUTUBE_HINTS,
        pattern: "extract_wisdom",
    },
    Rule {
        keywords: &["lecture", "class", "lesson"],
        hints: YOUTUBE_HINTS,
        pattern: "summarize_lecture",
    },
    Rule {
        keywords: &["vorlesung", "vortrag", "lektion"],
        hints: YOUTUBE_HINTS,
        pattern: "summarize_lecture",
    },
    Rule {
        keywords: &["chapters", "timestamps", "sections"],
        hints: YOUTUBE_HINTS,
        pattern: "create_video_chapters",
    },
    Rule {
        keywords: &["kapitel", "zeitstempel", "abschnitte"],
        hints: YOUTUBE_HINTS,
        pattern: "create_video_chapters",
    },
    // Paper / document patterns (EN + DE).
    Rule {
        keywords: &["paper", "academic", "research"],
        hints: &[],
        pattern: "summarize_paper",
    },
    Rule {
        keywords: &["paper", "akademisch", "forschung", "wissenschaftlich"],
        hints: &[],
        pattern: "summarize_paper",
    },
    Rule {
        keywords: &["analyze", "paper"],
        hints: &[],
        pattern: "analyze_paper",
    },
    Rule {
        keywords: &["analysier", "paper"],
        hints: &[],
        pattern: "analyze_paper",
    },
    // Security / threat patterns (EN + DE).
    Rule {
        keywords: &["threat", "report", "security"],
        hints: &[],
        pattern: "analyze_threat_report",
    },
    Rule {
        keywords: &["bedrohung", "bericht", "sicherheit"],
        hints: &[],
        pattern: "analyze_threat_report",
    },
    Rule {
        keywords: &["malware", "ioc", "indicator"],
        hints: &[],
        pattern: "analyze_malware",
    },
    Rule {
        keywords: &["schadsoftware", "indikator"],
        hints: &[],
        pattern: "analyze_malware",
    },
    Rule {
        keywords: &["sigma", "detection", "rule"],
        hints: &[],
        pattern: "create_sigma_rules",
    },
    Rule {
        keywords: &["sigma", "erkennung", "regel"],
        hints: &[],
        pattern: "create_sigma_rules",
    },
    Rule {
        keywords: &["stride", "threat", "model"],
        hints: &[],
        pattern: "create_stride_threat_model",
    },
    Rule {
        keywords: &["stride", "bedrohungsmodell"],
        hints: &[],
        pattern: "create_stride_threat_model",
    },
    // Code patterns (EN + DE).
    Rule {
        keywords: &["explain", "code"],
        hints: &[],
        pattern: "explain_code",
    },
    Rule {
        keywords: &["erklär", "code"],
        hints: &[],
        pattern: "explain_code",
    },
    Rule {
        keywords: &["review", "design", "architecture"],
        hints: &[],
        pattern: "review_design",
    },
    Rule {
        keywords: &["überprüf", "design", "architektur"],
        hints: &[],
        pattern: "review_design",
    },
    // General patterns (EN + DE).
    Rule {
        keywords: &["extract", "ideas"],
        hints: &[],
        pattern: "extract_ideas",
    },
    Rule {
        keywords: &["extrahier", "ideen"],
        hints: &[],
        pattern: "extract_ideas",
    },
    Rule {
        keywords: &["extract", "insights"],
        hints: &[],
        pattern: "extract_insights",
    },
    Rule {
        keywords: &["extrahier", "erkenntnisse"],
        hints: &[],
        pattern: "extract_insights",
    },
    Rule {
        keywords: &["analyze", "claims", "truth"],
        hints: &[],
        pattern: "analyze_claims",
    },
    Rule {
        keywords: &["analysier", "behauptungen", "wahrheit"],
        hints: &[],
        pattern: "analyze_claims",
    },
    Rule {
        keywords: &["summarize"],
        hints: &[],
        pattern: "summarize",
    },
    Rule {
        keywords: &["zusammenfass"],
        hints: &[],
        pattern: "summarize",
    },
];

/// Ordered actions for the `yt` source kind, sentinel default last.
const YOUTUBE_ACTIONS: &[SourceAction] = &[
    SourceAction {
        keyword: "summarize",
        pattern: "youtube_summary",
    },
    SourceAction {
        keyword: "zusammenfass",
        pattern: "youtube_summary",
    },
    SourceAction {
        keyword: "wisdom",
        pattern: "extract_wisdom",
    },
    SourceAction {
        keyword: "weisheit",
        pattern: "extract_wisdom",
    },
    SourceAction {
        keyword: "extract",
        pattern: "extract_wisdom",
    },
    SourceAction {
        keyword: "extrahier",
        pattern: "extract_wisdom",
    },
    SourceAction {
        keyword: "insights",
        pattern: "extract_wisdom",
    },
    SourceAction {
        keyword: "erkenntnisse",
        pattern: "extract_wisdom",
    },
    SourceAction {
        keyword: "lecture",
        pattern: "summarize_lecture",
    },
    SourceAction {
        keyword: "vorlesung",
        pattern: "summarize_lecture",
    },
    SourceAction {
        keyword: "chapters",
        pattern: "create_video_chapters",
    },
    SourceAction {
        keyword: "kapitel",
        pattern: "create_video_chapters",
    },
    SourceAction {
        keyword: "",
        pattern: "youtube_summary",
    },
];

/// Ordered actions for the `pdf` source kind, sentinel default last.
const PDF_ACTIONS: &[SourceAction] = &[
    SourceAction {
        keyword: "summarize",
        pattern: "summarize_paper",
    },
    SourceAction {
        keyword: "zusammenfass",
        pattern: "summarize_paper",
    },
    SourceAction {
        keyword: "analyze",
        pattern: "analyze_paper",
    },
    SourceAction {
        keyword: "analysier",
        pattern: "analyze_paper",
    },
    SourceAction {
        keyword: "",
        pattern: "summarize_paper",
    },
];

/// Action table for a source kind. Kinds with no table return an empty
/// slice, which sends the selector straight to the global rules.
pub fn source_actions(kind: SourceKind) -> &'static [SourceAction] {
    match kind {
        SourceKind::Youtube => YOUTUBE_ACTIONS,
        SourceKind::Pdf => PDF_ACTIONS,
        SourceKind::File | SourceKind::Github | SourceKind::Url => &[],
    }
}
