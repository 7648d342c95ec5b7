//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for medassist
#[derive(Parser, Debug)]
#[command(name = "medassist")]
#[command(author, version, about = "Adaptive medical diagnosis assistant")]
#[command(long_about = r#"
medassist asks yes/no questions about symptoms, scores every known condition
after each answer, and stops once one condition is clearly ahead. The result
names the most likely condition with medicines, exercises, diet and the kind
of doctor to see.

This is not a medical diagnosis. Always consult a healthcare professional.

Configuration files are loaded from (in priority order):
1. MEDASSIST_* environment variables (e.g. MEDASSIST_SERVER__BIND)
2. --config <path>       Explicit config file
3. ./medassist.toml      Project-level config
4. ~/.config/medassist/config.toml   Global config

Example:
  medassist serve --bind 0.0.0.0:8001
  medassist diagnose
  medassist conditions --json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP API
    Serve {
        /// Listen address, overrides server.bind
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },
    /// Interactive diagnosis in the terminal
    Diagnose,
    /// Print the condition catalog
    Conditions {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show configuration sources and the effective configuration
    ShowConfig,
}
