//! Run output envelope.
//!
//! Every run produces a [`RunOutput`], success or not. Two textual
//! encodings are offered: a JSON document, and a tagged-text form for
//! callers that splice results into prompts. Anything interpolated
//! into the tagged form is escaped for the five markup metacharacters.

use serde::Serialize;

/// The outcome of a pattern run.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RunOutput {
    /// The pattern ran and produced a result.
    Success {
        /// The pattern that ran.
        pattern: String,
        /// True when the pattern was chosen by auto-selection rather
        /// than named by the caller. Omitted from JSON when false.
        #[serde(skip_serializing_if = "is_false")]
        auto_selected: bool,
        /// The model's output.
        result: String,
    },
    /// No pattern could be selected; suggestions were generated.
    Suggestions {
        /// The caller's task.
        task: String,
        /// Suggested patterns, or an inline error note when the
        /// suggestion call itself failed.
        suggestions: String,
        /// How to retry with an explicit pattern.
        hint: String,
    },
    /// The run failed.
    Failure {
        /// What went wrong.
        error: String,
        /// The pattern involved, when one was resolved.
        #[serde(skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
        /// Whether that pattern was auto-selected.
        #[serde(skip_serializing_if = "Option::is_none")]
        auto_selected: Option<bool>,
        /// The source reference involved, when one was given.
        #[serde(skip_serializing_if = "Option::is_none")]
        source: Option<String>,
        /// How to recover, when there is a concrete next step.
        #[serde(skip_serializing_if = "Option::is_none")]
        hint: Option<String>,
    },
}

// Signature dictated by serde's skip_serializing_if.
fn is_false(value: &bool) -> bool {
    !value
}

impl RunOutput {
    /// Encode as a pretty-printed JSON document.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self)
            .unwrap_or_else(|e| format!("{{\"error\":\"failed to encode output: {e}\"}}"))
    }

    /// Encode as a tagged-text envelope.
    ///
    /// Attribute values and body text are escaped; attributes that
    /// carry no value are omitted entirely.
    pub fn to_tagged_text(&self) -> String {
        match self {
            Self::Success {
                pattern,
                auto_selected,
                result,
            } => {
                let auto = if *auto_selected {
                    " auto_selected=\"true\""
                } else {
                    ""
                };
                format!(
                    "<pattern_output pattern=\"{}\"{auto}>\n{}\n</pattern_output>",
                    escape(pattern),
                    escape(result)
                )
            }
            Self::Suggestions {
                task,
                suggestions,
                hint,
            } => format!(
                "<pattern_suggestions task=\"{}\" hint=\"{}\">\n{}\n</pattern_suggestions>",
                escape(task),
                escape(hint),
                escape(suggestions)
            ),
            Self::Failure {
                error,
                pattern,
                auto_selected: _,
                source,
                hint,
            } => {
                let mut attrs = String::new();
                if let Some(pattern) = pattern {
                    attrs.push_str(&format!(" pattern=\"{}\"", escape(pattern)));
                }
                if let Some(source) = source {
                    attrs.push_str(&format!(" source=\"{}\"", escape(source)));
                }
                let mut body = escape(error);
                if let Some(hint) = hint {
                    body.push('\n');
                    body.push_str(&escape(hint));
                }
                format!("<pattern_error{attrs}>\n{body}\n</pattern_error>")
            }
        }
    }
}

/// Escape the five markup metacharacters.
///
/// The ampersand goes first so entities introduced by the later
/// replacements are not escaped a second time.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
