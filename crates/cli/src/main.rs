//! `quality-kit`: provision formatting and linting setups into a
//! JavaScript/TypeScript project.

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use colored::Colorize;
use qk_core::config::load_config;
use qk_core::engine::{RunOptions, StatusSink, TaskManager, TerminalSink};
use qk_core::init::{init_editorconfig, init_prettier, init_tslint, run_setup, InitContext, SetupSelection};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "QUALITY_KIT_LOG";

#[derive(Parser)]
#[command(
    name = "quality-kit",
    about = "Set up Prettier, EditorConfig and TSLint in a JavaScript/TypeScript project",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: current directory)
    #[arg(long, global = true, env = "QUALITY_KIT_ROOT")]
    root: Option<PathBuf>,

    /// Check the project and show every step without changing anything
    #[arg(long, global = true)]
    dry_run: bool,

    /// Print the run reports as JSON on stdout
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log debug output to stderr
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upgrade prettier, use the shared config and add a pre-commit hook
    InitPrettier,

    /// Create an .editorconfig file
    InitEditorconfig,

    /// Install tslint with a default configuration and lint script
    InitTslint,

    /// Run several setups in one go (prettier and editorconfig by default)
    Setup {
        /// Set up prettier
        #[arg(long)]
        prettier: bool,

        /// Set up editorconfig
        #[arg(long)]
        editorconfig: bool,

        /// Set up tslint
        #[arg(long)]
        tslint: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let config = load_config(&root).await?;
    tracing::debug!("provisioning {} (dry run: {})", root.display(), cli.dry_run);

    // Status lines move to stderr so --json output stays parseable.
    let sink: Arc<dyn StatusSink> = if cli.json {
        Arc::new(TerminalSink::stderr())
    } else {
        Arc::new(TerminalSink::stdout())
    };
    let manager = TaskManager::new(RunOptions {
        dry_run: cli.dry_run,
        spinner: config.global.spinner.clone(),
        sink,
    });
    let context = InitContext::new(root, &config);

    let reports = match cli.command {
        Commands::InitPrettier => vec![init_prettier(&manager, &context).await?],
        Commands::InitEditorconfig => vec![init_editorconfig(&manager, &context).await?],
        Commands::InitTslint => vec![init_tslint(&manager, &context).await?],
        Commands::Setup {
            prettier,
            editorconfig,
            tslint,
        } => {
            let selection = SetupSelection {
                prettier,
                editorconfig,
                tslint,
            };
            run_setup(&manager, &context, selection).await?
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else if manager.is_dry_run() {
        println!(
            "{}",
            "Dry run: nothing was written, installed or committed.".yellow()
        );
    }

    Ok(())
}
