//! Deterministic pattern selection.
//!
//! Two ordered tables drive selection (see [`rules`]): per-source-kind
//! action lists consulted first when the caller named a source, and the
//! global keyword/hint rule table. Selection is pure string matching —
//! no model call, no I/O — so the same inputs always pick the same
//! pattern.

use tracing::debug;

use crate::source::SourceKind;

pub mod rules;

use rules::{Rule, SourceAction};

/// How many characters of the input sample are scanned for content
/// hints. A cost bound, not a correctness bound: hints identify the
/// input's origin (transcript headers, URLs) and sit at the front.
pub const CONTENT_HINT_WINDOW: usize = 1000;

/// Pick a pattern for `task`, or `None` when no rule applies.
///
/// Priority order:
/// 1. If `source` is a kind with an action table, the first action
///    keyword found in the task wins; the kind's sentinel default
///    applies when no keyword matches. A kind without a table (or
///    without a sentinel) falls through to the global rules.
/// 2. Global rules in declaration order. Rules with content hints match
///    on any keyword in the task plus any hint in the first
///    [`CONTENT_HINT_WINDOW`] characters of the lower-cased input
///    sample; rules without hints require every keyword in the task.
///
/// Matching is case-insensitive substring containment, deliberately not
/// whole-word: "extract" covers "extraction" and "zusammenfass" covers
/// "zusammenfassen", which is what keeps the table bilingual without
/// doubling every stem.
pub fn select_pattern(
    task: &str,
    input_sample: &str,
    source: Option<SourceKind>,
) -> Option<&'static str> {
    let task_lower = task.to_lowercase();

    if let Some(kind) = source {
        let actions = rules::source_actions(kind);
        if !actions.is_empty() {
            if let Some(pattern) = match_source_action(&task_lower, actions) {
                debug!(pattern, kind = %kind, "pattern selected via source action");
                return Some(pattern);
            }
        }
    }

    let window = hint_window(input_sample);

    for rule in rules::AUTO_SELECT_RULES {
        if rule_matches(rule, &task_lower, &window) {
            debug!(pattern = rule.pattern, "pattern selected via global rule");
            return Some(rule.pattern);
        }
    }

    None
}

/// Scan a kind's ordered actions for the first keyword contained in the
/// task; fall back to the sentinel default if one exists. The sentinel
/// is only consulted after every keyword action has failed, wherever it
/// sits in the list.
fn match_source_action(task_lower: &str, actions: &[SourceAction]) -> Option<&'static str> {
    for action in actions.iter().filter(|a| !a.is_default()) {
        if task_lower.contains(action.keyword) {
            return Some(action.pattern);
        }
    }
    actions.iter().find(|a| a.is_default()).map(|a| a.pattern)
}

fn rule_matches(rule: &Rule, task_lower: &str, window: &str) -> bool {
    if rule.hints.is_empty() {
        rule.keywords.iter().all(|kw| task_lower.contains(kw))
    } else {
        rule.keywords.iter().any(|kw| task_lower.contains(kw))
            && rule.hints.iter().any(|hint| window.contains(hint))
    }
}

/// The lower-cased hint window: first [`CONTENT_HINT_WINDOW`] characters
/// of the lower-cased sample.
///
/// Lowercasing never shrinks a char sequence, so taking the window from
/// a window-sized prefix of the original is equivalent to lowercasing
/// the whole sample first — without paying for megabytes of input.
fn hint_window(input_sample: &str) -> String {
    let prefix: String = input_sample.chars().take(CONTENT_HINT_WINDOW).collect();
    prefix
        .to_lowercase()
        .chars()
        .take(CONTENT_HINT_WINDOW)
        .collect()
}
