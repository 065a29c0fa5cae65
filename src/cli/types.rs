//! CLI type definitions.
//!
//! This module contains clap command structures that define the CLI
//! interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Parser)]
#[command(name = "accord")]
#[command(about = "Accord - declarative OS user account convergence", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Path to a config file (defaults to hierarchical lookup)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// All accord subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Converge accounts toward the desired state in a manifest
    Converge {
        /// Path to the YAML manifest of desired accounts
        #[arg(short = 'f', long)]
        manifest: PathBuf,

        /// Record the commands that would run without dispatching them
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the commands a manifest would dispatch, without running them
    Plan {
        /// Path to the YAML manifest of desired accounts
        #[arg(short = 'f', long)]
        manifest: PathBuf,
    },

    /// Remove an account
    Remove {
        /// Account name
        username: String,

        /// Also delete the home directory
        #[arg(long)]
        manage_home: bool,
    },

    /// Lock an account's password
    Lock {
        /// Account name
        username: String,
    },

    /// Unlock an account's password
    Unlock {
        /// Account name
        username: String,
    },
}
