//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use gatehouse_auth::generate_token;
use gatehouse_auth::headers::USER_TOKEN_HEADER;
use gatehouse_core::error::AppError;

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List all users (tokens are never shown)
    List,
    /// Add a new user and print their generated token once
    Add {
        /// Username
        username: String,
        /// Email address
        #[arg(short, long)]
        email: Option<String>,
        /// Role label
        #[arg(short, long)]
        role: Option<String>,
    },
    /// Remove a user
    Remove {
        /// Username
        username: String,
    },
    /// Activate a user (token becomes valid again)
    Activate {
        /// Username
        username: String,
    },
    /// Deactivate a user without removing the record
    Deactivate {
        /// Username
        username: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// Username
    username: String,
    /// Email
    email: String,
    /// Role
    role: String,
    /// Status
    status: String,
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config_env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let registry = super::open_registry(config_env)?;

    match &args.command {
        UserCommand::List => {
            let rows: Vec<UserRow> = registry
                .list()
                .into_iter()
                .map(|u| UserRow {
                    username: u.username,
                    email: u.email.unwrap_or_default(),
                    role: u.role,
                    status: if u.active { "active" } else { "inactive" }.to_string(),
                })
                .collect();

            output::print_list(&rows, format);
        }
        UserCommand::Add {
            username,
            email,
            role,
        } => {
            let token = generate_token();
            registry.add(username, &token, email.as_deref(), role.as_deref())?;

            output::print_success(&format!("User '{}' added", username));
            println!("\nUser token (save this — it won't be shown again):");
            println!("{}", token);
            println!("\nClient request header:");
            output::print_kv(USER_TOKEN_HEADER, &token);
        }
        UserCommand::Remove { username } => {
            registry.remove(username)?;
            output::print_success(&format!("User '{}' removed", username));
        }
        UserCommand::Activate { username } => {
            registry.set_active(username, true)?;
            output::print_success(&format!("User '{}' activated (token now valid)", username));
        }
        UserCommand::Deactivate { username } => {
            registry.set_active(username, false)?;
            output::print_success(&format!(
                "User '{}' deactivated (token no longer valid)",
                username
            ));
        }
    }

    Ok(())
}
