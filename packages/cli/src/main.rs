mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, init, menus, outline, publish, style, ApplyArgs, InitArgs, MenusArgs, OutlineArgs,
    PublishArgs, StyleArgs,
};

/// Tessera CLI - JSON-described screens and their layout designer
#[derive(Parser, Debug)]
#[command(name = "tessera")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Tessera project
    Init(InitArgs),

    /// Print a screen's node tree
    Outline(OutlineArgs),

    /// Apply a mutation script and save a draft
    Apply(ApplyArgs),

    /// Promote a screen's draft to published
    Publish(PublishArgs),

    /// Print the resolved container style of a node
    Style(StyleArgs),

    /// List the menus of a screen
    Menus(MenusArgs),
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Outline(args) => outline(args, &cwd),
        Command::Apply(args) => apply(args, &cwd),
        Command::Publish(args) => publish(args, &cwd),
        Command::Style(args) => style(args, &cwd),
        Command::Menus(args) => menus(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
