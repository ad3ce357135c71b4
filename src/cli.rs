//! Command line interface built on clap.
//!
//! [`Cli`] carries the global `--config` and `--verbose` flags and an
//! optional [`Command`]; without one the monitor runs its poll loop.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Watches homework review status and reports changes to Telegram.
#[derive(Debug, Parser)]
#[command(name = "review-watch", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the TOML config file (default: ./review-watch.toml).
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Poll forever, sleeping between cycles (the default).
    Run,

    /// Run a single cycle, print what happened and exit.
    Once,
}

impl Cli {
    pub fn selected_command(&self) -> Command {
        self.command.unwrap_or(Command::Run)
    }
}
