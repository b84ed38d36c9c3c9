//! Runner behavior: every outcome folds into the envelope.

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use weft::envelope::RunOutput;
use weft::patterns::PatternLibrary;
use weft::providers::{LlmProvider, ProviderError};
use weft::run::{PatternRunner, RunRequest};
use weft::source::loader::{ContentLoader, LoadError, LoaderRegistry};
use weft::source::SourceKind;

/// Echoes the system prompt and input back so tests can see exactly
/// what reached the model.
struct EchoProvider;

#[async_trait]
impl LlmProvider for EchoProvider {
    async fn prompt(&self, user_text: &str, system: &str) -> Result<String, ProviderError> {
        Ok(format!("[{system}] {user_text}"))
    }

    fn model_id(&self) -> &str {
        "mock/echo"
    }
}

struct FailingProvider;

#[async_trait]
impl LlmProvider for FailingProvider {
    async fn prompt(&self, _user_text: &str, _system: &str) -> Result<String, ProviderError> {
        Err(ProviderError::Parse("scripted failure".to_owned()))
    }

    fn model_id(&self) -> &str {
        "mock/failing"
    }
}

struct TranscriptLoader;

#[async_trait]
impl ContentLoader for TranscriptLoader {
    fn kind(&self) -> SourceKind {
        SourceKind::Youtube
    }

    async fn load(&self, _reference: &str) -> Result<String, LoadError> {
        Ok("welcome to the channel".to_owned())
    }
}

fn library_with(patterns: &[(&str, &str)]) -> (tempfile::TempDir, PatternLibrary) {
    let dir = tempfile::tempdir().expect("should create temp dir");
    for (name, system) in patterns {
        let pattern_dir = dir.path().join(name);
        std::fs::create_dir_all(&pattern_dir).expect("should create pattern dir");
        std::fs::write(pattern_dir.join("system.md"), system).expect("should write prompt");
    }
    let library = PatternLibrary::new(dir.path());
    (dir, library)
}

fn runner_with(
    patterns: &[(&str, &str)],
    provider: Arc<dyn LlmProvider>,
) -> (tempfile::TempDir, PatternRunner) {
    let (dir, library) = library_with(patterns);
    let loaders = LoaderRegistry::with_defaults(reqwest::Client::new());
    (dir, PatternRunner::new(library, provider, loaders))
}

#[tokio::test]
async fn requires_a_task_or_pattern() {
    let (_dir, runner) = runner_with(&[], Arc::new(EchoProvider));

    let output = runner.run(RunRequest::default()).await;
    match output {
        RunOutput::Failure { error, hint, .. } => {
            assert_eq!(error, "Either 'task' or 'pattern' must be provided");
            assert_eq!(
                hint.as_deref(),
                Some("Describe what you want to do, or specify a pattern name")
            );
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn explicit_pattern_runs_with_its_template() {
    let (_dir, runner) = runner_with(
        &[("summarize", "You summarize content.")],
        Arc::new(EchoProvider),
    );

    let output = runner
        .run(RunRequest {
            pattern: "summarize".to_owned(),
            input_text: "three laws of motion".to_owned(),
            ..Default::default()
        })
        .await;
    match output {
        RunOutput::Success {
            pattern,
            auto_selected,
            result,
        } => {
            assert_eq!(pattern, "summarize");
            assert!(!auto_selected);
            assert_eq!(result, "[You summarize content.] three laws of motion");
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn fabric_prefix_and_padding_are_stripped() {
    let (_dir, runner) = runner_with(&[("summarize", "s")], Arc::new(EchoProvider));

    let output = runner
        .run(RunRequest {
            pattern: "  fabric:summarize  ".to_owned(),
            ..Default::default()
        })
        .await;
    match output {
        RunOutput::Success { pattern, .. } => assert_eq!(pattern, "summarize"),
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_explicit_pattern_points_at_discovery() {
    let (_dir, runner) = runner_with(&[("summarize", "s")], Arc::new(EchoProvider));

    let output = runner
        .run(RunRequest {
            pattern: "no_such_pattern".to_owned(),
            ..Default::default()
        })
        .await;
    match output {
        RunOutput::Failure {
            error,
            pattern,
            hint,
            ..
        } => {
            assert_eq!(error, "pattern not found: no_such_pattern");
            assert_eq!(pattern, None);
            assert_eq!(
                hint.as_deref(),
                Some("Use fabric(task='describe what you want') to get pattern suggestions")
            );
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn auto_selection_marks_the_output() {
    let (_dir, runner) = runner_with(&[("summarize", "s")], Arc::new(EchoProvider));

    let output = runner
        .run(RunRequest {
            task: "summarize this article".to_owned(),
            input_text: "body".to_owned(),
            ..Default::default()
        })
        .await;
    match &output {
        RunOutput::Success {
            pattern,
            auto_selected,
            ..
        } => {
            assert_eq!(pattern, "summarize");
            assert!(*auto_selected);
        }
        other => panic!("expected success, got {other:?}"),
    }

    let encoded = output.to_json();
    assert!(encoded.contains("\"auto_selected\": true"), "{encoded}");
}

#[tokio::test]
async fn execution_failure_reports_the_pattern() {
    let (_dir, runner) = runner_with(&[("summarize", "s")], Arc::new(FailingProvider));

    let output = runner
        .run(RunRequest {
            pattern: "summarize".to_owned(),
            ..Default::default()
        })
        .await;
    match output {
        RunOutput::Failure {
            error,
            pattern,
            auto_selected,
            ..
        } => {
            assert!(error.starts_with("Pattern execution failed:"), "{error}");
            assert!(error.contains("scripted failure"), "{error}");
            assert_eq!(pattern.as_deref(), Some("summarize"));
            assert_eq!(auto_selected, None);
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn auto_selected_failure_keeps_the_flag() {
    let (_dir, runner) = runner_with(&[("summarize", "s")], Arc::new(FailingProvider));

    let output = runner
        .run(RunRequest {
            task: "summarize this".to_owned(),
            ..Default::default()
        })
        .await;
    match output {
        RunOutput::Failure {
            pattern,
            auto_selected,
            ..
        } => {
            assert_eq!(pattern.as_deref(), Some("summarize"));
            assert_eq!(auto_selected, Some(true));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn source_load_failure_names_the_source() {
    let (_dir, runner) = runner_with(&[("summarize", "s")], Arc::new(EchoProvider));

    let output = runner
        .run(RunRequest {
            task: "summarize this".to_owned(),
            source: "file:/definitely/not/here.txt".to_owned(),
            ..Default::default()
        })
        .await;
    match output {
        RunOutput::Failure {
            error,
            source,
            pattern,
            ..
        } => {
            assert!(error.starts_with("Failed to load source:"), "{error}");
            assert_eq!(source.as_deref(), Some("file:/definitely/not/here.txt"));
            assert_eq!(pattern, None);
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_source_references_fail_before_loading() {
    let (_dir, runner) = runner_with(&[], Arc::new(EchoProvider));

    for raw in ["no-delimiter", "gopher:burrow.example", "yt:not a video"] {
        let output = runner
            .run(RunRequest {
                task: "summarize".to_owned(),
                source: raw.to_owned(),
                ..Default::default()
            })
            .await;
        match output {
            RunOutput::Failure { error, source, .. } => {
                assert!(error.starts_with("Failed to load source:"), "{error}");
                assert_eq!(source.as_deref(), Some(raw));
            }
            other => panic!("expected failure for {raw}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn missing_loader_is_reported_not_panicked() {
    let (_dir, library) = library_with(&[("summarize", "s")]);
    let runner = PatternRunner::new(library, Arc::new(EchoProvider), LoaderRegistry::new());

    let output = runner
        .run(RunRequest {
            task: "summarize".to_owned(),
            source: "file:/tmp/anything".to_owned(),
            ..Default::default()
        })
        .await;
    match output {
        RunOutput::Failure { error, .. } => {
            assert!(
                error.contains("no loader available for file sources"),
                "{error}"
            );
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn loaded_source_replaces_inline_input() {
    let mut file = tempfile::NamedTempFile::new().expect("should create temp file");
    write!(file, "content from disk").expect("should write content");

    let (_dir, runner) = runner_with(&[("summarize", "s")], Arc::new(EchoProvider));
    let output = runner
        .run(RunRequest {
            task: "summarize this".to_owned(),
            input_text: "inline text that loses".to_owned(),
            source: format!("file:{}", file.path().display()),
            ..Default::default()
        })
        .await;
    match output {
        RunOutput::Success { result, .. } => {
            assert!(result.contains("content from disk"), "{result}");
            assert!(!result.contains("inline text that loses"), "{result}");
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn source_kind_drives_selection_when_the_task_is_vague() {
    let (_dir, library) = library_with(&[("youtube_summary", "You summarize videos.")]);
    let mut loaders = LoaderRegistry::new();
    loaders.register(Arc::new(TranscriptLoader));
    let runner = PatternRunner::new(library, Arc::new(EchoProvider), loaders);

    let output = runner
        .run(RunRequest {
            task: "what is this about".to_owned(),
            source: "yt:dQw4w9WgXcQ".to_owned(),
            ..Default::default()
        })
        .await;
    match output {
        RunOutput::Success {
            pattern,
            auto_selected,
            result,
        } => {
            assert_eq!(pattern, "youtube_summary");
            assert!(auto_selected);
            assert!(result.contains("welcome to the channel"), "{result}");
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn unmatched_tasks_return_suggestions() {
    let (_dir, runner) = runner_with(&[], Arc::new(EchoProvider));

    let output = runner
        .run(RunRequest {
            task: "translate this to French".to_owned(),
            ..Default::default()
        })
        .await;
    match output {
        RunOutput::Suggestions {
            task,
            suggestions,
            hint,
        } => {
            assert_eq!(task, "translate this to French");
            // Built-in suggestion prompt, fed the task as the user turn.
            assert!(
                suggestions.contains("You recommend Fabric patterns"),
                "{suggestions}"
            );
            assert!(
                suggestions.contains("User request: translate this to French"),
                "{suggestions}"
            );
            assert_eq!(
                hint,
                "Call fabric(pattern='pattern_name', input_text=content) with your chosen pattern"
            );
        }
        other => panic!("expected suggestions, got {other:?}"),
    }
}

#[tokio::test]
async fn library_suggest_pattern_overrides_the_builtin_prompt() {
    let (_dir, runner) = runner_with(
        &[("suggest_pattern", "Custom suggestion prompt.")],
        Arc::new(EchoProvider),
    );

    let output = runner
        .run(RunRequest {
            task: "translate this".to_owned(),
            ..Default::default()
        })
        .await;
    match output {
        RunOutput::Suggestions { suggestions, .. } => {
            assert!(suggestions.contains("Custom suggestion prompt."), "{suggestions}");
            assert!(
                !suggestions.contains("You recommend Fabric patterns"),
                "{suggestions}"
            );
        }
        other => panic!("expected suggestions, got {other:?}"),
    }
}

#[tokio::test]
async fn suggestion_failures_degrade_to_an_inline_note() {
    let (_dir, runner) = runner_with(&[], Arc::new(FailingProvider));

    let output = runner
        .run(RunRequest {
            task: "translate this".to_owned(),
            ..Default::default()
        })
        .await;
    match output {
        RunOutput::Suggestions { suggestions, .. } => {
            assert!(
                suggestions.starts_with("Error getting suggestions:"),
                "{suggestions}"
            );
        }
        other => panic!("expected suggestions, got {other:?}"),
    }
}
