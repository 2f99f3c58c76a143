//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::credentials::CredentialBundle;

/// An authenticated session.
///
/// Sessions are derived, ephemeral entities: the identifier is a one-way
/// digest of the username and the session-scope id, so two requests with
/// the same pair collapse to the same session. There is no explicit
/// destroy operation; cached sessions expire after a period of inactivity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Stable, non-reversible session handle.
    pub session_id: String,
    /// Owning username.
    pub username: String,
    /// Email used for downstream attribution (falls back to the username).
    pub email: String,
    /// Downstream credential bundle.
    pub credentials: CredentialBundle,
    /// When the session was first materialized.
    pub created_at: DateTime<Utc>,
    /// When the session was last seen.
    pub last_seen: DateTime<Utc>,
}

impl Session {
    /// Create a fresh session materialized at the current instant.
    pub fn new(
        session_id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        credentials: CredentialBundle,
    ) -> Self {
        let now = Utc::now();
        Self {
            session_id: session_id.into(),
            username: username.into(),
            email: email.into(),
            credentials,
            created_at: now,
            last_seen: now,
        }
    }
}

/// The cache wire form of a session.
///
/// Identity fields are stored in plaintext; the credential bundle is
/// encrypted with the server's session key before it touches the cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedSession {
    /// Owning username.
    pub username: String,
    /// Email used for downstream attribution.
    pub email: String,
    /// Base64 `[ciphertext || nonce]` blob of the credential bundle.
    pub encrypted_credentials: String,
    /// When the session was first materialized.
    pub created_at: DateTime<Utc>,
    /// When the session was last seen.
    pub last_seen: DateTime<Utc>,
}
