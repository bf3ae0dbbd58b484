//! sharectl
//!
//! Declarative management of macOS share points through the `sharing` tool.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::{CommandFactory, Parser};
use colored::Colorize;

use cli::{Cli, Commands};
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    tracing::debug!("Verbose mode enabled");

    let ctx = Context::from_cli(&cli);
    match cli.command {
        Some(cmd) => execute_command(&ctx, cmd),
        None => {
            println!(
                "{} Share point manager",
                "sharectl".green().bold()
            );
            println!();
            println!("Run {} for available commands.", "sharectl --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(ctx: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::List { all, json, input } => commands::run_list(ctx, all, json, input.as_deref()),
        Commands::Check { json } => commands::run_check(ctx, json),
        Commands::Sync { dry_run, jobs, json } => commands::run_sync(ctx, dry_run, jobs, json),
        Commands::Validate => commands::run_validate(ctx),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

fn cmd_completions(shell: clap_complete::Shell) {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "sharectl", &mut std::io::stdout());
}
