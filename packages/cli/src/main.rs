mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{block, drop_block, export, init, BlockArgs, DropArgs, ExportArgs, InitArgs};
use tracing_subscriber::EnvFilter;

/// Blockmail CLI - build responsive emails from block documents
#[derive(Parser, Debug)]
#[command(name = "blockmail")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Blockmail project
    Init(InitArgs),

    /// Print a new block as JSON
    Block(BlockArgs),

    /// Apply a drag payload to a document
    Drop(DropArgs),

    /// Render *.email.json documents to HTML or MJML
    Export(ExportArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Init(args) => init(args, &cwd),
                Command::Block(args) => block(args),
                Command::Drop(args) => drop_block(args, &cwd),
                Command::Export(args) => export(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
