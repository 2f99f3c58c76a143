//! Server-held downstream credential bundle.

use serde::{Deserialize, Serialize};

/// Third-party credentials attached to an authenticated session.
///
/// The bundle is held server-side and is opaque to the authentication
/// flow; it is encrypted before being written to the session cache.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialBundle {
    /// Downstream account email.
    pub account_email: String,
    /// Downstream API key (secret).
    pub api_key: String,
}

impl CredentialBundle {
    /// Create a new credential bundle.
    pub fn new(account_email: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            account_email: account_email.into(),
            api_key: api_key.into(),
        }
    }
}

// Manual Debug keeps the API key out of log output.
impl std::fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("account_email", &self.account_email)
            .field("api_key", &"****")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_api_key() {
        let bundle = CredentialBundle::new("ops@example.com", "very-secret");
        let debug = format!("{bundle:?}");
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("ops@example.com"));
    }
}
