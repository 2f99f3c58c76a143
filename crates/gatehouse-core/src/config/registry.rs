//! User registry configuration.

use serde::{Deserialize, Serialize};

/// Token registry persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Path to the JSON document holding all user records.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> String {
    "data/users.json".to_string()
}
