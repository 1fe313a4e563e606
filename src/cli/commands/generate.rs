//! Generate Command
//!
//! Documents every eligible file in a workspace.
//!
//! Usage:
//!   docsmith generate [PATH] [--output DIR] [--provider P] [--model M]
//!                     [--ignore GLOB]... [--no-summary] [--dry-run]

use std::path::PathBuf;

use tokio::runtime::Runtime;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::cli::progress::{
    MessageLevel, ProgressEvent, ProgressTracker, format_duration, render_progress_bar,
};
use crate::cli::ui::Output;
use crate::cli::util::{build_summarizer, load_config, resolve_root};
use crate::config::Config;
use crate::docs::{DocGenerator, NO_FILES_MESSAGE};
use crate::types::Result;
use crate::types::utils::format_bytes;

/// Generate run options (CLI flags)
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Workspace root (current directory when unset)
    pub path: Option<PathBuf>,
    /// `--config` file replacing the layered lookup
    pub config_file: Option<PathBuf>,
    /// Output directory, relative to the workspace root
    pub output: Option<PathBuf>,
    pub provider: Option<String>,
    pub model: Option<String>,
    /// Replaces the configured ignore globs when non-empty
    pub ignore: Vec<String>,
    pub no_summary: bool,
    pub dry_run: bool,
    /// Suppress per-file progress lines
    pub quiet: bool,
}

/// Apply CLI flags over the loaded configuration
pub fn apply_overrides(config: &mut Config, options: &GenerateOptions) {
    if let Some(output) = &options.output {
        config.output.dir = output.clone();
    }

    if let Some(provider) = &options.provider
        && *provider != config.llm.provider
    {
        config.llm.provider = provider.clone();
        // the configured model belongs to the old provider
        config.llm.model.clear();
    }

    if let Some(model) = &options.model {
        config.llm.model = model.clone();
    }

    if !options.ignore.is_empty() {
        config.scan.ignore_patterns = options.ignore.clone();
    }
}

pub fn run(options: GenerateOptions) -> Result<()> {
    let root = resolve_root(options.path.clone())?;
    let mut config = load_config(&root, options.config_file.as_deref())?;
    apply_overrides(&mut config, &options);
    config.validate()?;

    let output = Output::new();

    if options.dry_run {
        let summarizer = build_summarizer(&config, true)?;
        let generator = DocGenerator::new(&root, &config, summarizer);
        return print_plan(&generator, &output);
    }

    let summarizer = build_summarizer(&config, options.no_summary)?;
    let generator = DocGenerator::new(&root, &config, summarizer.clone());

    output.header("Generating documentation");
    output.kv("Workspace", &root.display().to_string());
    output.kv("Output", &generator.output_root().display().to_string());
    output.kv("Summaries", &summarizer.describe());

    let rt = Runtime::new()?;
    let report = rt.block_on(async {
        let tracker = ProgressTracker::new();
        let renderer = spawn_renderer(tracker.subscribe(), options.quiet);

        let report = generator.run(&tracker).await;

        // closing the channel ends the renderer
        drop(tracker);
        let _ = renderer.await;
        report
    })?;

    if report.total > 0 {
        output.kv("Documented", &report.documented.to_string());
        if report.failed > 0 {
            output.kv("Failed", &report.failed.to_string());
        }
        if report.write_failures > 0 {
            output.kv("Not written", &report.write_failures.to_string());
        }
    }

    Ok(())
}

fn print_plan(generator: &DocGenerator, output: &Output) -> Result<()> {
    let files = generator.plan()?;

    if files.is_empty() {
        output.warning(NO_FILES_MESSAGE);
        return Ok(());
    }

    output.section(&format!("{} files would be documented", files.len()));
    for file in &files {
        println!("  {} ({})", file.relative_path, format_bytes(file.size));
    }
    output.info(&format!(
        "Output directory: {}",
        generator.output_root().display()
    ));
    Ok(())
}

/// Print progress events until the tracker is dropped
fn spawn_renderer(mut rx: broadcast::Receiver<ProgressEvent>, quiet: bool) -> JoinHandle<()> {
    tokio::spawn(async move {
        let output = Output::new();

        loop {
            match rx.recv().await {
                Ok(ProgressEvent::Started { .. }) => {}
                Ok(ProgressEvent::FileProgress {
                    completed,
                    total,
                    current_item,
                }) => {
                    if !quiet {
                        let bar = render_progress_bar(completed, total, 20);
                        output.progress(&bar, completed, total, &current_item);
                    }
                }
                Ok(ProgressEvent::Message { level, message }) => match level {
                    MessageLevel::Info => output.info(&message),
                    MessageLevel::Warning => output.warning(&message),
                    MessageLevel::Error => output.error(&message),
                },
                Ok(ProgressEvent::Error { item, error }) => {
                    output.warning(&format!("{}: {}", item, error));
                }
                Ok(ProgressEvent::Finished {
                    success,
                    total_duration_secs,
                    summary,
                }) => {
                    let line = format!("{} in {}", summary, format_duration(total_duration_secs));
                    if success {
                        output.success(&line);
                    } else {
                        output.warning(&line);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!("Progress renderer skipped {} events", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_config_values() {
        let mut config = Config::default();
        let options = GenerateOptions {
            output: Some(PathBuf::from("out")),
            ignore: vec!["**/target/**".to_string()],
            ..Default::default()
        };

        apply_overrides(&mut config, &options);

        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert_eq!(config.scan.ignore_patterns, vec!["**/target/**"]);
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.llm.model, "gemini-1.5-flash");
    }

    #[test]
    fn test_provider_switch_drops_stale_model() {
        let mut config = Config::default();
        let options = GenerateOptions {
            provider: Some("ollama".to_string()),
            ..Default::default()
        };

        apply_overrides(&mut config, &options);
        assert_eq!(config.llm.provider, "ollama");
        assert!(config.llm.model.is_empty());

        let options = GenerateOptions {
            provider: Some("openai".to_string()),
            model: Some("gpt-4o".to_string()),
            ..Default::default()
        };
        apply_overrides(&mut config, &options);
        assert_eq!(config.llm.model, "gpt-4o");
    }

    #[test]
    fn test_empty_ignore_keeps_config() {
        let mut config = Config::default();
        apply_overrides(&mut config, &GenerateOptions::default());
        assert_eq!(
            config.scan.ignore_patterns,
            vec!["**/{node_modules,.git,dist,bin}/**"]
        );
    }

    #[test]
    fn test_run_offline_writes_docs() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.js"), "export default 1;\n").unwrap();
        let config_file = dir.path().join("docsmith.toml");
        std::fs::write(&config_file, "").unwrap();

        run(GenerateOptions {
            path: Some(dir.path().to_path_buf()),
            config_file: Some(config_file),
            no_summary: true,
            quiet: true,
            ..Default::default()
        })
        .unwrap();

        let page =
            std::fs::read_to_string(dir.path().join("documentations/index.js.md")).unwrap();
        assert!(page.contains("Summary generation disabled"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.js"), "export default 1;\n").unwrap();
        let config_file = dir.path().join("docsmith.toml");
        std::fs::write(&config_file, "").unwrap();

        run(GenerateOptions {
            path: Some(dir.path().to_path_buf()),
            config_file: Some(config_file),
            dry_run: true,
            ..Default::default()
        })
        .unwrap();

        assert!(!dir.path().join("documentations").exists());
    }
}
