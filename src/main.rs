//! Weft CLI entry point.
//!
//! `run` executes a Fabric pattern against a task, source, or piped
//! input and prints the result envelope; `patterns` lists the library.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};

use weft::config::{load_config, load_default_config, runtime_paths};
use weft::credentials::load_default_credentials;
use weft::logging;
use weft::patterns::PatternLibrary;
use weft::providers::create_provider;
use weft::run::{PatternRunner, RunRequest};
use weft::source::loader::LoaderRegistry;
use weft::source::normalize::expand_home;

/// Weft — run Fabric AI patterns against files, videos, documents, and repos.
#[derive(Parser)]
#[command(name = "weft", version, about)]
struct Cli {
    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Command {
    /// Run a pattern (explicit or auto-selected) and print the result.
    Run(RunArgs),
    /// List patterns available in the library.
    Patterns,
}

/// Arguments for the `run` subcommand.
#[derive(Args)]
struct RunArgs {
    /// Task description used for pattern auto-selection.
    task: Option<String>,

    /// Exact pattern name, skipping auto-selection.
    #[arg(short, long)]
    pattern: Option<String>,

    /// Content source as prefix:argument (file, yt, pdf, github, url).
    #[arg(short, long)]
    source: Option<String>,

    /// Inline input text. When omitted and no source is given, piped
    /// stdin is used.
    #[arg(short, long)]
    input: Option<String>,

    /// Output encoding.
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model spec override (provider/model).
    #[arg(short, long)]
    model: Option<String>,

    /// Config file path, instead of ~/.weft/config.toml.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// How the result envelope is printed.
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON document.
    Json,
    /// Tagged-text envelope for prompt splicing.
    Tags,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => handle_run(args, cli.verbose).await,
        Command::Patterns => handle_patterns(cli.verbose),
    }
}

/// Run a pattern and print the result envelope to stdout.
async fn handle_run(args: RunArgs, verbose: bool) -> anyhow::Result<()> {
    let paths = runtime_paths()?;
    let _logging_guard = logging::init_with_file(&paths.log_dir, verbose)?;

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => load_default_config().context("failed to load config")?,
    };
    let credentials = load_default_credentials().context("failed to load credentials")?;

    let model_spec = args
        .model
        .unwrap_or_else(|| config.models.default.clone());
    let provider = create_provider(&model_spec, &credentials)
        .with_context(|| format!("failed to create provider for {model_spec}"))?;

    let client = reqwest::Client::builder()
        .user_agent(&config.http.user_agent)
        .timeout(Duration::from_secs(config.http.timeout_secs))
        .build()
        .context("failed to build HTTP client")?;
    let loaders = LoaderRegistry::with_defaults(client);

    let library = PatternLibrary::new(expand_home(&config.patterns.dir));

    let input_text = match args.input {
        Some(text) => text,
        None if args.source.is_none() && !std::io::stdin().is_terminal() => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
        None => String::new(),
    };

    let runner = PatternRunner::new(library, provider, loaders);
    let output = runner
        .run(RunRequest {
            task: args.task.unwrap_or_default(),
            pattern: args.pattern.unwrap_or_default(),
            input_text,
            source: args.source.unwrap_or_default(),
        })
        .await;

    match args.format {
        OutputFormat::Json => println!("{}", output.to_json()),
        OutputFormat::Tags => println!("{}", output.to_tagged_text()),
    }
    Ok(())
}

/// List the pattern library, one name per line.
fn handle_patterns(verbose: bool) -> anyhow::Result<()> {
    logging::init_cli(verbose);

    let config = load_default_config().context("failed to load config")?;
    let library = PatternLibrary::new(expand_home(&config.patterns.dir));

    let names = library.list().with_context(|| {
        format!(
            "failed to list patterns in {}",
            library.root().display()
        )
    })?;

    if names.is_empty() {
        println!("no patterns found in {}", library.root().display());
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(())
}
