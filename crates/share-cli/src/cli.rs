//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// sharectl - Keep macOS share points in line with a declared manifest
#[derive(Parser, Debug)]
#[command(name = "sharectl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Manifest to load; repeat to layer several, later files win
    #[arg(short, long = "config", global = true, env = "SHARECTL_CONFIG")]
    pub configs: Vec<PathBuf>,

    /// Path to the sharing executable (skips the platform check)
    #[arg(long, global = true, value_name = "PATH")]
    pub sharing_bin: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the share points on this host as manifest entries
    ///
    /// Examples:
    ///   sharectl list                        # Minimal [[share]] entries
    ///   sharectl list --all                  # Spell out every attribute
    ///   sharectl list --input saved.txt      # Parse saved `sharing -l` output
    List {
        /// Keep attributes that match their defaults
        #[arg(long)]
        all: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Read a saved listing instead of running the tool
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Check declared shares for drift
    Check {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Bring share points in line with the manifest
    Sync {
        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Number of shares to reconcile concurrently
        #[arg(short, long, default_value_t = 1)]
        jobs: usize,

        /// Output as JSON for CI/CD integration
        #[arg(long)]
        json: bool,
    },

    /// Validate manifests without touching the system
    Validate,

    /// Generate shell completions
    ///
    /// Examples:
    ///   sharectl completions bash > ~/.local/share/bash-completion/completions/sharectl
    ///   sharectl completions zsh > ~/.zfunc/_sharectl
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
