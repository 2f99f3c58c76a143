//! Token validation and administrative mutation over the user registry.

use std::sync::RwLock;

use tracing::{error, info, warn};

use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;
use gatehouse_entity::user::{DEFAULT_ROLE, UserRecord, UserSummary};

use crate::store::RegistryStore;

/// How many characters of a rejected token appear in the audit log.
const TOKEN_LOG_PREFIX: usize = 8;

/// The durable set of known users.
///
/// Reads take a shared lock; administrative mutations take the exclusive
/// lock for the whole read-modify-write cycle, including the re-serialize
/// to disk, so concurrent mutations never interleave.
#[derive(Debug)]
pub struct TokenRegistry {
    /// Persistence backend.
    store: RegistryStore,
    /// In-memory mirror of the registry document.
    users: RwLock<Vec<UserRecord>>,
}

impl TokenRegistry {
    /// Open a registry backed by the given document path, loading any
    /// existing records.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Self {
        let store = RegistryStore::new(path);
        let users = store.load();
        info!(count = users.len(), "Token registry loaded");
        Self {
            store,
            users: RwLock::new(users),
        }
    }

    /// Validate an opaque bearer token.
    ///
    /// Returns the first active record whose stored token exactly equals
    /// the input. Missing, unknown, and inactive-record tokens are all
    /// invalid. Both outcomes land in the audit log; rejected tokens are
    /// truncated so secrets never leak into log output.
    pub fn validate(&self, token: &str) -> Option<UserRecord> {
        if token.is_empty() {
            return None;
        }

        let users = self.users.read().expect("registry lock poisoned");
        for user in users.iter() {
            if user.token == token && user.active {
                info!(username = %user.username, "Token validated");
                return Some(user.clone());
            }
        }

        warn!(token_prefix = %truncate_token(token), "Invalid token attempted");
        None
    }

    /// Add a new active user. Rejects duplicate usernames.
    pub fn add(
        &self,
        username: &str,
        token: &str,
        email: Option<&str>,
        role: Option<&str>,
    ) -> AppResult<()> {
        if username.is_empty() {
            return Err(AppError::validation("Username must not be empty"));
        }
        if token.is_empty() {
            return Err(AppError::validation("Token must not be empty"));
        }

        let mut users = self.users.write().expect("registry lock poisoned");
        if users.iter().any(|u| u.username == username) {
            warn!(username, "User already exists");
            return Err(AppError::conflict(format!(
                "User '{username}' already exists"
            )));
        }

        users.push(UserRecord {
            username: username.to_string(),
            token: token.to_string(),
            email: email.map(String::from),
            role: role.unwrap_or(DEFAULT_ROLE).to_string(),
            active: true,
        });
        self.persist(&users);

        info!(username, role = role.unwrap_or(DEFAULT_ROLE), "User added");
        Ok(())
    }

    /// Remove a user by username.
    pub fn remove(&self, username: &str) -> AppResult<()> {
        let mut users = self.users.write().expect("registry lock poisoned");
        let before = users.len();
        users.retain(|u| u.username != username);

        if users.len() == before {
            warn!(username, "User not found");
            return Err(AppError::not_found(format!("User '{username}' not found")));
        }

        self.persist(&users);
        info!(username, "User removed");
        Ok(())
    }

    /// Activate or deactivate a user without removing the record.
    ///
    /// Takes effect on the very next `validate` call; the registry holds
    /// no cached active-state of its own.
    pub fn set_active(&self, username: &str, active: bool) -> AppResult<()> {
        let mut users = self.users.write().expect("registry lock poisoned");
        let Some(user) = users.iter_mut().find(|u| u.username == username) else {
            warn!(username, "User not found");
            return Err(AppError::not_found(format!("User '{username}' not found")));
        };

        user.active = active;
        self.persist(&users);

        info!(username, active, "User active flag updated");
        Ok(())
    }

    /// List all users without their tokens.
    pub fn list(&self) -> Vec<UserSummary> {
        let users = self.users.read().expect("registry lock poisoned");
        users.iter().map(UserRecord::summary).collect()
    }

    /// Persist the current record set, holding the write lock.
    ///
    /// A persist failure is logged and swallowed: the in-memory state has
    /// already been updated and stays usable, at the accepted risk of
    /// losing the change if the process dies before the next successful
    /// save.
    fn persist(&self, users: &[UserRecord]) {
        if let Err(e) = self.store.save(users) {
            error!(error = %e, "Failed to persist registry; in-memory state retained");
        }
    }
}

/// Truncate a token for audit logging.
fn truncate_token(token: &str) -> &str {
    let end = token
        .char_indices()
        .nth(TOKEN_LOG_PREFIX)
        .map_or(token.len(), |(i, _)| i);
    &token[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_registry() -> (tempfile::TempDir, TokenRegistry) {
        let dir = tempfile::tempdir().unwrap();
        let registry = TokenRegistry::open(dir.path().join("users.json"));
        (dir, registry)
    }

    #[test]
    fn test_validate_active_user() {
        let (_dir, registry) = open_registry();
        registry.add("alice", "T1", None, None).unwrap();

        let user = registry.validate("T1").unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, "member");
    }

    #[test]
    fn test_validate_unknown_token() {
        let (_dir, registry) = open_registry();
        registry.add("alice", "T1", None, None).unwrap();

        assert!(registry.validate("T2").is_none());
        assert!(registry.validate("").is_none());
    }

    #[test]
    fn test_deactivate_invalidates_without_deleting() {
        let (_dir, registry) = open_registry();
        registry.add("alice", "T1", None, None).unwrap();

        registry.set_active("alice", false).unwrap();
        assert!(registry.validate("T1").is_none());
        assert_eq!(registry.list().len(), 1);

        registry.set_active("alice", true).unwrap();
        assert!(registry.validate("T1").is_some());
    }

    #[test]
    fn test_duplicate_add_rejected() {
        let (_dir, registry) = open_registry();
        registry
            .add("alice", "T1", Some("a@example.com"), None)
            .unwrap();

        let err = registry.add("alice", "T2", None, None).unwrap_err();
        assert_eq!(err.kind, gatehouse_core::error::ErrorKind::Conflict);

        // First record untouched.
        let user = registry.validate("T1").unwrap();
        assert_eq!(user.email.as_deref(), Some("a@example.com"));
        assert!(registry.validate("T2").is_none());
    }

    #[test]
    fn test_remove_user() {
        let (_dir, registry) = open_registry();
        registry.add("alice", "T1", None, None).unwrap();

        registry.remove("alice").unwrap();
        assert!(registry.validate("T1").is_none());
        assert!(registry.list().is_empty());

        let err = registry.remove("alice").unwrap_err();
        assert_eq!(err.kind, gatehouse_core::error::ErrorKind::NotFound);
    }

    #[test]
    fn test_set_active_unknown_user() {
        let (_dir, registry) = open_registry();
        let err = registry.set_active("nobody", false).unwrap_err();
        assert_eq!(err.kind, gatehouse_core::error::ErrorKind::NotFound);
    }

    #[test]
    fn test_list_excludes_tokens() {
        let (_dir, registry) = open_registry();
        registry
            .add("alice", "T1", Some("a@example.com"), Some("admin"))
            .unwrap();
        registry.add("bob", "T2", None, None).unwrap();

        let listing = registry.list();
        assert_eq!(listing.len(), 2);
        let json = serde_json::to_string(&listing).unwrap();
        assert!(!json.contains("T1"));
        assert!(!json.contains("T2"));
    }

    #[test]
    fn test_truncate_token() {
        assert_eq!(truncate_token("abcdefghijkl"), "abcdefgh");
        assert_eq!(truncate_token("short"), "short");
    }
}
