//! Autolink CLI - render social-media entities as HTML links.
//!
//! Provides commands for:
//! - `render`: Render text and pre-located entities (JSON) as HTML
//! - `defuse`: Escape angle brackets before entities are located

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{DefuseArgs, RenderArgs};
use output::Output;

/// Autolink - render URLs, hashtags, mentions and cashtags as HTML links.
#[derive(Parser)]
#[command(name = "autolink", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render text with located entities as HTML.
    Render(RenderArgs),
    /// Escape `<` and `>` in raw text before tokenizing.
    Defuse(DefuseArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Render(args) if args.verbose);
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(&output),
        Commands::Defuse(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// `--verbose` enables INFO level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}
