//! The pattern runner: the single caller-facing operation.
//!
//! [`PatternRunner::run`] takes a task/pattern/input/source request,
//! loads the source if one is given, resolves a pattern (explicit
//! name, auto-selection, or suggestions), invokes the model in
//! isolation, and always returns a [`RunOutput`]. Every failure is
//! folded into the envelope; nothing here raises to the caller.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::envelope::RunOutput;
use crate::patterns::{PatternError, PatternLibrary, SUGGEST_PATTERN, SUGGEST_PROMPT};
use crate::providers::{LlmProvider, ProviderError};
use crate::select::select_pattern;
use crate::source::loader::{LoadError, LoaderRegistry};
use crate::source::normalize::normalize;
use crate::source::{SourceError, SourceKind, SourceRef};

/// A single run request.
///
/// All fields are optional at the wire level; [`PatternRunner::run`]
/// validates that at least one of `task` and `pattern` is set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunRequest {
    /// What to accomplish; drives pattern auto-selection.
    #[serde(default)]
    pub task: String,
    /// Explicit pattern name; skips auto-selection when set.
    #[serde(default)]
    pub pattern: String,
    /// Pre-loaded input text.
    #[serde(default)]
    pub input_text: String,
    /// Source reference (`prefix:argument`) to load input from.
    #[serde(default)]
    pub source: String,
}

/// Errors recovered into the output envelope.
///
/// None of these escape [`PatternRunner::run`]; they exist so each
/// failure is classified before it is folded into a [`RunOutput`].
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The source reference is missing its delimiter or names an
    /// unknown prefix.
    #[error("{0}")]
    InvalidSourceFormat(SourceError),
    /// The normalizer rejected the source argument.
    #[error("{0}")]
    InvalidReference(SourceError),
    /// No loader is registered for the source kind.
    #[error("no loader available for {kind} sources")]
    LoaderUnavailable {
        /// The kind with no registered loader.
        kind: SourceKind,
    },
    /// The loader failed to fetch or read the content.
    #[error("{0}")]
    LoadFailure(#[from] LoadError),
    /// Pattern template lookup failed.
    #[error("{0}")]
    PatternNotFound(#[from] PatternError),
    /// The model invocation failed.
    #[error("{0}")]
    ExecutionFailure(#[from] ProviderError),
    /// Neither task nor pattern was supplied.
    #[error("Either 'task' or 'pattern' must be provided")]
    Validation,
}

impl From<SourceError> for RunError {
    fn from(e: SourceError) -> Self {
        match e {
            SourceError::InvalidReference { .. } => Self::InvalidReference(e),
            SourceError::InvalidFormat { .. } | SourceError::UnknownPrefix { .. } => {
                Self::InvalidSourceFormat(e)
            }
        }
    }
}

/// JSON Schema definition for the tool surface exposed to models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name.
    pub name: String,
    /// Description shown to the model.
    pub description: String,
    /// JSON Schema object for the tool's parameters.
    pub input_schema: Value,
}

/// Runs Fabric patterns against loaded content.
pub struct PatternRunner {
    library: PatternLibrary,
    provider: Arc<dyn LlmProvider>,
    loaders: LoaderRegistry,
}

impl PatternRunner {
    /// Create a runner from its three collaborators.
    pub fn new(
        library: PatternLibrary,
        provider: Arc<dyn LlmProvider>,
        loaders: LoaderRegistry,
    ) -> Self {
        Self {
            library,
            provider,
            loaders,
        }
    }

    /// Execute a run request.
    ///
    /// This never fails: every error becomes the envelope's failure
    /// form, and suggestion generation degrades to an inline error
    /// string rather than raising.
    pub async fn run(&self, request: RunRequest) -> RunOutput {
        let run_id = Uuid::new_v4();
        info!(
            run_id = %run_id,
            pattern = %request.pattern,
            source = %request.source,
            task_chars = request.task.chars().count(),
            "pattern run started"
        );

        // Load from source if provided, replacing any inline input.
        let mut input_text = request.input_text.clone();
        let mut source_kind = None;
        if !request.source.is_empty() {
            match self.load_source(&request.source).await {
                Ok((kind, text)) => {
                    source_kind = Some(kind);
                    input_text = text;
                }
                Err(e) => {
                    warn!(run_id = %run_id, error = %e, source = %request.source, "source load failed");
                    return RunOutput::Failure {
                        error: format!("Failed to load source: {e}"),
                        pattern: None,
                        auto_selected: None,
                        source: Some(request.source.clone()),
                        hint: None,
                    };
                }
            }
        }

        if request.task.is_empty() && request.pattern.is_empty() {
            let e = RunError::Validation;
            return RunOutput::Failure {
                error: e.to_string(),
                pattern: None,
                auto_selected: None,
                source: None,
                hint: Some("Describe what you want to do, or specify a pattern name".to_owned()),
            };
        }

        // Explicit pattern wins over auto-selection.
        if !request.pattern.is_empty() {
            let name = request.pattern.trim();
            let name = name.strip_prefix("fabric:").unwrap_or(name);
            return match self.run_pattern(name, &input_text).await {
                Ok(result) => RunOutput::Success {
                    pattern: name.to_owned(),
                    auto_selected: false,
                    result,
                },
                Err(RunError::PatternNotFound(e)) => RunOutput::Failure {
                    error: e.to_string(),
                    pattern: None,
                    auto_selected: None,
                    source: None,
                    hint: Some(
                        "Use fabric(task='describe what you want') to get pattern suggestions"
                            .to_owned(),
                    ),
                },
                Err(e) => RunOutput::Failure {
                    error: format!("Pattern execution failed: {e}"),
                    pattern: Some(name.to_owned()),
                    auto_selected: None,
                    source: None,
                    hint: None,
                },
            };
        }

        if let Some(name) = select_pattern(&request.task, &input_text, source_kind) {
            return match self.run_pattern(name, &input_text).await {
                Ok(result) => RunOutput::Success {
                    pattern: name.to_owned(),
                    auto_selected: true,
                    result,
                },
                Err(e) => RunOutput::Failure {
                    error: format!("Pattern execution failed: {e}"),
                    pattern: Some(name.to_owned()),
                    auto_selected: Some(true),
                    source: None,
                    hint: None,
                },
            };
        }

        // No clear match; hand back suggestions instead of guessing.
        let suggestions = self.suggest(&request.task).await;
        RunOutput::Suggestions {
            task: request.task.clone(),
            suggestions,
            hint: "Call fabric(pattern='pattern_name', input_text=content) with your chosen pattern"
                .to_owned(),
        }
    }

    /// Handle a tool call with JSON arguments, returning JSON text.
    pub async fn handle_tool_call(&self, arguments: Value) -> String {
        let request: RunRequest = match serde_json::from_value(arguments) {
            Ok(request) => request,
            Err(e) => {
                return RunOutput::Failure {
                    error: format!("Invalid tool arguments: {e}"),
                    pattern: None,
                    auto_selected: None,
                    source: None,
                    hint: None,
                }
                .to_json();
            }
        };
        self.run(request).await.to_json()
    }

    async fn load_source(&self, raw: &str) -> Result<(SourceKind, String), RunError> {
        let source_ref = SourceRef::parse(raw)?;
        let canonical = normalize(source_ref.kind, &source_ref.argument)?;
        let loader = self
            .loaders
            .get(source_ref.kind)
            .ok_or(RunError::LoaderUnavailable {
                kind: source_ref.kind,
            })?;

        debug!(kind = %source_ref.kind, reference = %canonical, "loading source");
        let text = loader.load(&canonical).await?;
        info!(
            kind = %source_ref.kind,
            chars = text.chars().count(),
            "source loaded"
        );
        Ok((source_ref.kind, text))
    }

    async fn run_pattern(&self, name: &str, input_text: &str) -> Result<String, RunError> {
        let template = self.library.find(name)?;
        debug!(
            pattern = name,
            model = self.provider.model_id(),
            "running pattern"
        );
        let result = self.provider.prompt(input_text, &template.system).await?;
        Ok(result)
    }

    /// Generate pattern suggestions for a task.
    ///
    /// Uses the library's own `suggest_pattern` template when present,
    /// a built-in prompt otherwise. A failed model call degrades to an
    /// inline error string.
    async fn suggest(&self, task: &str) -> String {
        let system = match self.library.find(SUGGEST_PATTERN) {
            Ok(template) => template.system,
            Err(PatternError::NotFound { .. }) => SUGGEST_PROMPT.to_owned(),
            Err(e) => {
                debug!(error = %e, "suggest_pattern lookup failed, using built-in prompt");
                SUGGEST_PROMPT.to_owned()
            }
        };

        let prompt = format!("User request: {task}");
        match self.provider.prompt(&prompt, &system).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "suggestion generation failed");
                format!("Error getting suggestions: {e}")
            }
        }
    }
}

/// The tool definition for exposing the runner to a model.
pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: "fabric".to_owned(),
        description: "Run a Fabric AI pattern in isolation. Use for summarization, \
                      content extraction, analysis, and code review without pulling \
                      large inputs into the conversation. Provide 'task' to \
                      auto-select a pattern, or 'pattern' to name one. Prefer \
                      'source' over 'input_text' so content is loaded inside the \
                      tool: file:/path, yt:VIDEO, pdf:PATH_OR_URL, \
                      github:owner/repo, url:https://..."
            .to_owned(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "task": {
                    "type": "string",
                    "description": "What to accomplish; used to auto-select a pattern",
                },
                "pattern": {
                    "type": "string",
                    "description": "Exact pattern name to run (skips auto-selection)",
                },
                "input_text": {
                    "type": "string",
                    "description": "Content to process when no source is given",
                },
                "source": {
                    "type": "string",
                    "description": "Content source as prefix:argument (file, yt, pdf, github, url)",
                },
            },
            "required": [],
        }),
    }
}
