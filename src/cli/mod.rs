//! CLI module for VitaHealth
//!
//! Provides command-line interface parsing for the `vitahealth` binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod commands;
pub mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// VitaHealth - nutritional-deficiency screening from the terminal
///
/// Talks to the same backend as the web frontend and keeps its session and
/// planner progress in a local JSON file.
#[derive(Parser, Debug)]
#[command(
    name = "vitahealth",
    author = "VitaHealth Team",
    version,
    about = "VitaHealth - nutritional-deficiency screening client",
    long_about = "Upload a photo for deficiency detection, follow the matching meal planner\n\
                  and manage your detection history from the terminal.",
    after_help = "EXAMPLES:\n    \
                  vitahealth login --email ada@example.com     # Start a session\n    \
                  vitahealth detect eye.jpg --open-planner      # Detect and show the plan\n    \
                  vitahealth planner VitaminC --done \"Day 1\"    # Tick off a day\n    \
                  vitahealth history delete 42                  # Remove a record"
)]
pub struct Cli {
    /// Path to the configuration file (default: vitahealth.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend origin, overriding the configuration
    #[arg(long, global = true, env = "VITAHEALTH_ORIGIN")]
    pub origin: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account
    Register(RegisterArgs),

    /// Log in and store the session locally
    Login {
        #[arg(short, long)]
        email: String,

        /// Password (prefer the environment variable over the flag)
        #[arg(short, long, env = "VITAHEALTH_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show who is logged in and the navigation available
    Whoami,

    /// Upload an image for deficiency detection
    Detect {
        /// Image file to analyze
        image: PathBuf,

        /// Show the matching planner after a successful detection
        #[arg(long)]
        open_planner: bool,
    },

    /// Show the meal planner for a deficiency and track progress
    Planner {
        /// Planner key, e.g. VitaminC or B-Vitamin
        vitamin: String,

        /// Mark a day as done
        #[arg(long, value_name = "DAY", conflicts_with = "undo")]
        done: Option<String>,

        /// Mark a day as not done
        #[arg(long, value_name = "DAY")]
        undo: Option<String>,
    },

    /// List detection history
    History {
        #[command(subcommand)]
        action: Option<HistoryCommands>,
    },

    /// Show profile and history
    Profile,

    /// Print the PDF report link for a planner
    Report {
        vitamin: String,
    },

    /// Show the resolved configuration
    Config,
}

/// Registration fields
#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub firstname: String,

    #[arg(long)]
    pub lastname: String,

    #[arg(short, long)]
    pub email: String,

    #[arg(short, long, env = "VITAHEALTH_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// History subcommands
#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// Delete a history record
    Delete {
        /// Record id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
