//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Cronsmith - provision a host to run a Python program on a daily schedule.
#[derive(Debug, Parser)]
#[command(name = "cronsmith")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides cronsmith.yml discovery)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Whether this invocation should avoid prompting.
    pub fn effective_non_interactive(&self) -> bool {
        match &self.command {
            Some(Commands::Run(args)) => args.non_interactive,
            _ => false,
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Provision the host (default if no command specified)
    Run(RunArgs),

    /// Show what is installed and scheduled
    Status(StatusArgs),

    /// Remove the managed cron entry
    Remove(RemoveArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Preview the steps without executing them
    #[arg(long)]
    pub dry_run: bool,

    /// Use defaults, no prompts
    #[arg(long)]
    pub non_interactive: bool,

    /// Answer yes to the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Daily invocation time as HH:MM (overrides the configured schedule)
    #[arg(long, value_name = "HH:MM")]
    pub at: Option<String>,

    /// Skip the package installation steps
    #[arg(long)]
    pub skip_packages: bool,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `remove` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RemoveArgs {
    /// Answer yes to the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
