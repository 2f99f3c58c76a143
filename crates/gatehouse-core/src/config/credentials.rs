//! Server-held downstream credential configuration.
//!
//! Gatehouse never accepts third-party credentials from inbound requests.
//! The credential bundle attached to authenticated sessions is read from
//! environment variables named here.

use serde::{Deserialize, Serialize};

/// Names of the environment variables supplying the downstream credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Environment variable holding the downstream account email.
    #[serde(default = "default_email_env")]
    pub email_env: String,
    /// Environment variable holding the downstream API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            email_env: default_email_env(),
            api_key_env: default_api_key_env(),
        }
    }
}

fn default_email_env() -> String {
    "GATEHOUSE_API_EMAIL".to_string()
}

fn default_api_key_env() -> String {
    "GATEHOUSE_API_KEY".to_string()
}
