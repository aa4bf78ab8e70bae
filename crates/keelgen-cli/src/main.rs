//! keelgen CLI entrypoint
//! Parses command-line arguments and dispatches to the core generator.

// Internal imports (std, crate)
use reqwest::Url;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use keelgen_core::{Config, TemplateKind};
use notify::{RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const DEFAULT_PROJECT_NAME: &str = "api_client";
const DEFAULT_OUTPUT_DIR: &str = "src/api";
const WATCH_SETTLE: Duration = Duration::from_millis(200);

#[derive(Parser)]
#[command(name = "keelgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate a typed client from an OpenAPI document
    Generate {
        #[command(flatten)]
        source: SourceArgs,
        /// Regenerate whenever the document or the template directory changes
        #[arg(long)]
        watch: bool,
    },
    /// Compare the output directory with a fresh run; exits 1 on drift
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// YAML configuration file; flags given alongside it win
    #[arg(long)]
    config: Option<PathBuf>,
    /// Project name
    #[arg(long)]
    project_name: Option<String>,
    /// Path or URL to OpenAPI document (YAML or JSON)
    ///
    /// Example: --schema-path openapi.yaml
    /// Example: --schema-path https://example.com/openapi.json
    #[arg(long)]
    schema_path: Option<String>,
    /// Output directory for generated code (default: src/api)
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Template to use for code generation (rust_reqwest or custom)
    #[arg(long)]
    template_kind: Option<String>,
    /// Custom template directory
    #[arg(long)]
    template_dir: Option<PathBuf>,
    /// Only generate this operationId (repeatable)
    #[arg(long = "include", value_name = "OPERATION_ID")]
    include: Vec<String>,
    /// Skip this operationId (repeatable)
    #[arg(long = "exclude", value_name = "OPERATION_ID")]
    exclude: Vec<String>,
    /// Base URL joined with a relative server URL of the document
    #[arg(long)]
    base_url: Option<Url>,
    /// Also write a dereferenced schemas/{operation}.json per operation
    #[arg(long)]
    emit_schemas: bool,
}

impl SourceArgs {
    /// Build the generator config: the config file if given, then the flags.
    async fn resolve(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .await
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => {
                let schema_path = self
                    .schema_path
                    .clone()
                    .context("--schema-path is required when no --config is given")?;
                Config::new(DEFAULT_PROJECT_NAME, schema_path, DEFAULT_OUTPUT_DIR)
            }
        };

        if let Some(project_name) = &self.project_name {
            config.project_name = project_name.clone();
        }
        if let Some(schema_path) = &self.schema_path {
            config.openapi_schema_path = schema_path.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.to_string_lossy().to_string();
        }
        if let Some(template_kind) = &self.template_kind {
            config.template_kind = template_kind.clone();
        }
        if let Some(template_dir) = &self.template_dir {
            config.template_dir = Some(template_dir.to_string_lossy().to_string());
        }
        if !self.include.is_empty() {
            config.include_operations = self.include.clone();
        }
        if !self.exclude.is_empty() {
            config.exclude_operations = self.exclude.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = Some(base_url.clone());
        }
        if self.emit_schemas {
            config.emit_schemas = true;
        }

        config
            .template_kind
            .parse::<TemplateKind>()
            .map_err(|e| anyhow::anyhow!("Invalid template '{}': {e}", config.template_kind))?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Generate { source, watch } => {
            let config = source.resolve().await?;
            if *watch {
                if let Err(e) = run_generate(&config).await {
                    tracing::error!("{e:#}");
                }
                watch_and_regenerate(&config).await?;
            } else {
                run_generate(&config).await?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { source } => {
            let config = source.resolve().await?;
            let report = keelgen_core::check(&config).await.with_context(|| {
                format!("Failed to render client from {}", config.openapi_schema_path)
            })?;
            println!("{report}");
            if report.is_clean() {
                Ok(ExitCode::SUCCESS)
            } else {
                tracing::warn!(
                    "{} is out of date; run `keelgen generate` to refresh it",
                    config.output_dir
                );
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

async fn run_generate(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Generating {} from {} with template {}",
        config.project_name,
        config.openapi_schema_path,
        config.template_kind
    );
    let files = keelgen_core::generate(config).await.with_context(|| {
        format!("Failed to generate client from {}", config.openapi_schema_path)
    })?;
    println!(
        "✅ Generated {} files in: {}",
        files.len(),
        config.output_dir
    );
    Ok(())
}

/// Regenerate on every change to the document or template directory until
/// interrupted.
async fn watch_and_regenerate(config: &Config) -> anyhow::Result<()> {
    let location = &config.openapi_schema_path;
    if location.starts_with("http://") || location.starts_with("https://") {
        anyhow::bail!("--watch needs a local document, got {location}");
    }
    let document = std::fs::canonicalize(location)
        .with_context(|| format!("Failed to resolve {location}"))?;
    let template_dir = config
        .template_dir
        .as_ref()
        .map(std::fs::canonicalize)
        .transpose()
        .context("Failed to resolve template directory")?;

    let (tx, mut rx) = mpsc::channel(64);
    let mut watcher = notify::recommended_watcher(move |event: notify::Result<notify::Event>| {
        // The receiver is gone only when the loop below has returned.
        let _ = tx.blocking_send(event);
    })
    .context("Failed to start file watcher")?;

    // Editors often replace the file, so watch its directory.
    let document_dir = document.parent().unwrap_or_else(|| Path::new("/"));
    watcher.watch(document_dir, RecursiveMode::NonRecursive)?;
    if let Some(dir) = &template_dir {
        watcher.watch(dir, RecursiveMode::Recursive)?;
    }
    tracing::info!("Watching {} for changes", document.display());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping watch");
                return Ok(());
            }
            event = rx.recv() => match event {
                None => return Ok(()),
                Some(Err(e)) => tracing::warn!(error = %e, "file watcher error"),
                Some(Ok(event)) => {
                    let relevant = !event.kind.is_access()
                        && event.paths.iter().any(|path| {
                            path == &document
                                || template_dir.as_ref().is_some_and(|dir| path.starts_with(dir))
                        });
                    if !relevant {
                        continue;
                    }
                    tokio::time::sleep(WATCH_SETTLE).await;
                    while rx.try_recv().is_ok() {}
                    if let Err(e) = run_generate(config).await {
                        tracing::error!("{e:#}");
                    }
                }
            }
        }
    }
}
