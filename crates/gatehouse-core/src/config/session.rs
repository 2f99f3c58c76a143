//! Session materialization configuration.

use serde::{Deserialize, Serialize};

/// Session materializer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Base64-encoded 32-byte key for credential bundle encryption.
    ///
    /// The placeholder default fails key validation at startup, so a
    /// deployment cannot silently run with a known key.
    #[serde(default = "default_encryption_key")]
    pub encryption_key: String,
    /// Cached session time-to-live in seconds.
    #[serde(default = "default_session_ttl")]
    pub ttl_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            encryption_key: default_encryption_key(),
            ttl_seconds: default_session_ttl(),
        }
    }
}

fn default_encryption_key() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_session_ttl() -> u64 {
    3600
}
