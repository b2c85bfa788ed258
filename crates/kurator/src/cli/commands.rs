//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Kurator - Discord bot for curated projects
#[derive(Parser, Debug)]
#[command(name = "kurator")]
#[command(about = "Discord bot managing curated projects, their staff and published summaries", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file replacing ./kurator.toml
    #[arg(short, long, global = true, env = "KURATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Connect to Discord and serve interactions
    Run {
        /// Do not apply pending migrations first, whatever the configuration says
        #[arg(long)]
        skip_migrations: bool,
    },

    /// Apply pending database migrations and exit
    Migrate,

    /// Print the effective configuration with secrets masked
    CheckConfig,
}
