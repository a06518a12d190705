//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all zettldeck
//! commands. It uses clap's derive API for declarative argument parsing.
//!
//! ## Commands
//!
//! - `build`: Extract flashcards from notes and write Anki packages
//! - `init`: Initialize zettldeck configuration and an empty deck store

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Build(cmd)) => cmd.args.common.verbose || cmd.args.debug,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Notes directory to scan (overrides config file)
    #[arg(short, long)]
    pub notes: Option<PathBuf>,

    /// Output directory for .apkg packages (overrides config file)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Deck store file (overrides config file)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct BuildArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print extraction details without touching notes, packages, or the store
    #[arg(long)]
    pub debug: bool,
}

#[derive(Debug, Args)]
pub struct BuildCommand {
    #[command(flatten)]
    pub args: BuildArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract flashcards from markdown notes and build one Anki package per deck
    Build(BuildCommand),
    /// Initialize a new .zettldeckrc.json configuration file and an empty deck store
    Init,
}
