//! CLI interface for the match agent

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "match-agent")]
#[command(about = "Command-line client for the resume job-matching service")]
#[command(
    long_about = "Upload a resume, fetch ranked job recommendations, and view per-job match reports from the matching backend"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload a resume for parsing
    Upload {
        /// Path to the resume file
        file: PathBuf,
    },

    /// Fetch ranked job recommendations for the uploaded resume
    Recommend {
        /// Number of recommendations to request
        #[arg(short, long)]
        top: Option<u32>,
    },

    /// Fetch the detailed match report for one job posting
    Report {
        /// Job posting identifier
        job_id: String,
    },

    /// Show the current session state
    Session,

    /// Clear all session state, including the report cache
    Reset,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set the preferred display locale
    SetLocale {
        /// Locale code, e.g. "zh" or "en"
        locale: String,
    },

    /// Reset configuration to defaults
    Reset,
}
