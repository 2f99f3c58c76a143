//! CLI command definitions and dispatch.

pub mod token;
pub mod user;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use gatehouse_core::error::AppError;
use gatehouse_registry::TokenRegistry;

/// Gatehouse — token authentication for team RPC access
#[derive(Debug, Parser)]
#[command(name = "gatehouse", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (config/<env>.toml overlay)
    #[arg(short, long, default_value = "default")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// User management
    User(user::UserArgs),
    /// Token generation
    Token(token::TokenArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::User(args) => user::execute(args, &self.config, self.format).await,
            Commands::Token(args) => token::execute(args).await,
        }
    }
}

/// Helper: load configuration and open the registry it names
pub fn open_registry(config_env: &str) -> Result<TokenRegistry, AppError> {
    let config = gatehouse_core::config::AppConfig::load(config_env)?;
    Ok(TokenRegistry::open(config.registry.path))
}
