use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docsmith::cli::commands::{analyze, config, generate};

#[derive(Parser)]
#[command(name = "docsmith")]
#[command(
    version,
    about = "Per-file markdown documentation for a workspace, with AI summaries"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, global = true, help = "Load this config file instead of the layered lookup")]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate documentation for every eligible file in a workspace
    Generate {
        #[arg(help = "Workspace root (default: current directory)")]
        path: Option<PathBuf>,
        #[arg(long, short, help = "Output directory, relative to the workspace root")]
        output: Option<PathBuf>,
        #[arg(long, help = "LLM provider (gemini, openai, ollama, none)")]
        provider: Option<String>,
        #[arg(long, help = "Model to use")]
        model: Option<String>,
        #[arg(long = "ignore", help = "Ignore glob, repeatable (replaces configured globs)")]
        ignore: Vec<String>,
        #[arg(long = "no-summary", help = "Skip AI summaries")]
        no_summary: bool,
        #[arg(long = "dry-run", help = "List eligible files without writing anything")]
        dry_run: bool,
    },

    /// Show structure hints and dependencies for one file
    Analyze {
        #[arg(help = "File to analyze")]
        file: PathBuf,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            value_parser = ["text", "json"],
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(long, help = "Print as JSON instead of TOML")]
        json: bool,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mdocsmith encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Generate {
            path,
            output,
            provider,
            model,
            ignore,
            no_summary,
            dry_run,
        } => {
            generate::run(generate::GenerateOptions {
                path,
                config_file: cli.config,
                output,
                provider,
                model,
                ignore,
                no_summary,
                dry_run,
                quiet: cli.quiet,
            })?;
        }
        Commands::Analyze { file, format } => {
            analyze::run(&file, &format)?;
        }
        Commands::Config { action } => {
            let root = std::env::current_dir()?;
            match action {
                ConfigAction::Show { json } => {
                    config::show(&root, cli.config.as_deref(), json)?;
                }
                ConfigAction::Path => {
                    config::path(&root)?;
                }
                ConfigAction::Init { global, force } => {
                    if global {
                        config::init_global(force)?;
                    } else {
                        config::init_project(&root, force)?;
                    }
                }
            }
        }
    }

    Ok(())
}
