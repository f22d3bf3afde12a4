//! CLI module for the route planner
//!
//! # Commands
//!
//! - `serve` - Start the HTTP server
//! - `plan` - Plan routes for one prompt and print the JSON result
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! route-planner serve
//!
//! # One-shot planning from the terminal
//! route-planner plan "淀川沿いを50kmくらい走りたい" --start 枚方市駅
//!
//! # Generate shell completions
//! route-planner completions bash > ~/.bash_completion.d/route-planner
//! ```

pub mod completions;
pub mod config;
pub mod plan;
pub mod serve;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::config::PlannerConfig;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "route-planner.toml";

/// Route planner - cycling routes from a free-text request
#[derive(Parser, Debug)]
#[command(
    name = "route-planner",
    version,
    about = "Plan cycling routes from a free-text request"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Plan routes for a single prompt and print them as JSON
    Plan(PlanArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "ROUTE_PLANNER_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "ROUTE_PLANNER_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ROUTE_PLANNER_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// What kind of ride you want, in your own words
    pub prompt: String,

    /// Default start location offered to the completion service
    #[arg(short, long)]
    pub start: Option<String>,

    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Load the config file if it exists, otherwise defaults, then apply env overrides.
pub fn load_config(path: &Path) -> Result<PlannerConfig, Box<dyn std::error::Error>> {
    let config = if path.exists() {
        PlannerConfig::load(Some(path))?
    } else {
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        PlannerConfig::default()
    };

    Ok(config.with_env_overrides())
}
