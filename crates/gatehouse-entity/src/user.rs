//! User record entity owned by the token registry.

use serde::{Deserialize, Serialize};

/// Default role assigned to newly added users.
pub const DEFAULT_ROLE: &str = "member";

/// A registered user in the Gatehouse registry.
///
/// The token is an opaque secret compared verbatim during validation.
/// Usernames are unique within the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique login name.
    pub username: String,
    /// Opaque bearer token (secret).
    pub token: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Free-form role label.
    #[serde(default = "default_role")]
    pub role: String,
    /// Whether the token is currently accepted.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl UserRecord {
    /// Create a new active record.
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
            email: None,
            role: DEFAULT_ROLE.to_string(),
            active: true,
        }
    }

    /// Return the token-free listing form of this record.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            active: self.active,
        }
    }
}

/// A user listing row. Tokens are never included in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Unique login name.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Free-form role label.
    pub role: String,
    /// Whether the token is currently accepted.
    pub active: bool,
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_excludes_token() {
        let record = UserRecord::new("alice", "secret-token");
        let json = serde_json::to_value(record.summary()).unwrap();
        assert!(json.get("token").is_none());
        assert_eq!(json["username"], "alice");
    }

    #[test]
    fn test_missing_active_defaults_to_true() {
        let record: UserRecord =
            serde_json::from_str(r#"{"username":"bob","token":"t","email":null}"#).unwrap();
        assert!(record.active);
        assert_eq!(record.role, DEFAULT_ROLE);
    }
}
