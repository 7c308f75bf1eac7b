mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, init, set, show, types, ApplyArgs, InitArgs, SetArgs, ShowArgs, TypesArgs};
use tracing::Level;

/// Sitekit CLI - build sites out of pages, sections and elements
#[derive(Parser, Debug)]
#[command(name = "sitekit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log mutations and storage calls
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a project with a Home page
    Init(InitArgs),

    /// Print a project's pages, sections and elements
    Show(ShowArgs),

    /// Apply mutations from a JSON file
    Apply(ApplyArgs),

    /// Update one element from key=value fields
    Set(SetArgs),

    /// List element types and their variants
    Types(TypesArgs),
}

fn run(command: Command) -> Result<()> {
    let cwd = std::env::current_dir().context("cannot get current directory")?;

    match command {
        Command::Init(args) => init(args, &cwd),
        Command::Show(args) => show(args, &cwd),
        Command::Apply(args) => apply(args, &cwd),
        Command::Set(args) => set(args, &cwd),
        Command::Types(args) => types(args),
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli.command) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
