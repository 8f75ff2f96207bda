mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, export, init, load, save, themes, ApplyArgs, ExportArgs, InitArgs, LoadArgs, SaveArgs,
    ThemesArgs,
};
use mediakit_builder::BuilderConfig;

/// Media kit CLI - build, export and publish media kit layouts
#[derive(Parser, Debug)]
#[command(name = "mediakit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a config file and a starter layout
    Init(InitArgs),

    /// Render a layout to HTML or normalized JSON
    Export(ExportArgs),

    /// Replay an action script against a layout
    Apply(ApplyArgs),

    /// List builtin themes or print one as CSS
    Themes(ThemesArgs),

    /// Upload a layout to the configured endpoint
    Save(SaveArgs),

    /// Download the stored layout
    Load(LoadArgs),
}

/// `--verbose` or `"debugMode": true` in the config raise logging to debug
fn log_level(verbose: bool, debug_mode: bool) -> &'static str {
    if verbose || debug_mode {
        "debug"
    } else {
        "warn"
    }
}

fn main() {
    let cli = Cli::parse();

    let debug_mode = std::env::current_dir()
        .ok()
        .and_then(|cwd| BuilderConfig::load(&cwd).ok())
        .is_some_and(|config| config.debug_mode);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level(cli.verbose, debug_mode))),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Export(args) => export(args, &cwd),
            Command::Apply(args) => apply(args, &cwd),
            Command::Themes(args) => themes(args),
            Command::Save(args) => save(args, &cwd),
            Command::Load(args) => load(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
