//! Token generation CLI commands.

use clap::{Args, Subcommand};

use gatehouse_auth::generate_token;
use gatehouse_core::error::AppError;

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Generate a bearer token without registering a user
    Generate,
}

/// Execute token commands
pub async fn execute(args: &TokenArgs) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Generate => {
            println!("{}", generate_token());
            println!("\nRegister it with: gatehouse user add <username>");
        }
    }

    Ok(())
}
