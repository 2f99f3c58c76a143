//! Session materialization: validate a token, derive the session
//! identifier, and produce a session backed by the encrypted cache.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use gatehouse_cache::CacheManager;
use gatehouse_cache::keys;
use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;
use gatehouse_core::traits::cache::CacheProvider;
use gatehouse_entity::credentials::CredentialBundle;
use gatehouse_entity::session::{CachedSession, Session};
use gatehouse_registry::TokenRegistry;

use crate::crypto::SessionCipher;
use crate::token::generate_token;

/// Hex characters of the digest kept in the display form of a session id.
const SESSION_ID_HEX_LEN: usize = 16;

/// Derive the stable session identifier for a `(username, scope)` pair.
///
/// The identifier is a truncated SHA-256 digest of `username:scope`, so it
/// is deterministic per pair, distinct across scopes, and cannot be
/// reversed to recover the scope id.
pub fn derive_session_id(username: &str, session_scope: &str) -> String {
    let digest = Sha256::digest(format!("{username}:{session_scope}").as_bytes());
    let hex: String = digest
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<String>();
    format!("user_{}", &hex[..SESSION_ID_HEX_LEN])
}

/// Materializes authenticated sessions from bearer tokens.
#[derive(Debug, Clone)]
pub struct SessionMaterializer {
    /// Token registry consulted on every request.
    registry: Arc<TokenRegistry>,
    /// Best-effort session cache.
    cache: CacheManager,
    /// Cipher protecting credential bundles in the cache.
    cipher: SessionCipher,
    /// Cached session time-to-live.
    session_ttl: Duration,
}

impl SessionMaterializer {
    /// Create a new session materializer.
    pub fn new(
        registry: Arc<TokenRegistry>,
        cache: CacheManager,
        cipher: SessionCipher,
        session_ttl: Duration,
    ) -> Self {
        Self {
            registry,
            cache,
            cipher,
            session_ttl,
        }
    }

    /// Authenticate a request and materialize its session.
    ///
    /// 1. Reject a missing token.
    /// 2. Validate the token against the registry; the registry is
    ///    authoritative, so a deactivated user is rejected even when a
    ///    cached session for the same identifier still exists.
    /// 3. Generate a fresh random scope when the caller supplied none,
    ///    which yields a brand-new, unshareable session.
    /// 4. Derive the session identifier and consult the cache; any cache,
    ///    decryption, or parse failure downgrades to a miss.
    /// 5. On a miss, assemble the session from the validated identity and
    ///    the server-held fallback credentials, then cache it best-effort.
    pub async fn authenticate(
        &self,
        token: Option<&str>,
        session_scope: Option<&str>,
        fallback_credentials: &CredentialBundle,
    ) -> AppResult<Session> {
        let token = token.filter(|t| !t.is_empty()).ok_or_else(|| {
            warn!("Missing user token in request");
            AppError::missing_token("Missing authentication: user token header required")
        })?;

        let user = self
            .registry
            .validate(token)
            .ok_or_else(|| AppError::invalid_token("Invalid authentication token"))?;

        let scope = match session_scope.filter(|s| !s.is_empty()) {
            Some(scope) => scope.to_string(),
            None => generate_token(),
        };

        let session_id = derive_session_id(&user.username, &scope);

        if let Some(session) = self.load_cached(&session_id).await {
            return Ok(session);
        }

        let email = user.email.clone().unwrap_or_else(|| user.username.clone());
        let session = Session::new(
            &session_id,
            &user.username,
            &email,
            fallback_credentials.clone(),
        );
        self.cache_session(&session).await;

        info!(
            session_id = %session.session_id,
            username = %session.username,
            "New user session created"
        );
        Ok(session)
    }

    /// Load and decrypt a cached session.
    ///
    /// Every failure path returns `None`: the cache is a rebuildable
    /// projection and must never abort the request.
    async fn load_cached(&self, session_id: &str) -> Option<Session> {
        let key = keys::session(session_id);

        let cached: CachedSession = match self.cache.get_json(&key).await {
            Ok(Some(cached)) => cached,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Failed to load session from cache");
                return None;
            }
        };

        let plaintext = match self.cipher.decrypt(&cached.encrypted_credentials) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                warn!(session_id, error = %e, "Cached credentials undecryptable; treating as miss");
                return None;
            }
        };

        let credentials: CredentialBundle = match serde_json::from_slice(&plaintext) {
            Ok(credentials) => credentials,
            Err(e) => {
                warn!(session_id, error = %e, "Malformed cached credential bundle; treating as miss");
                return None;
            }
        };

        let session = Session {
            session_id: session_id.to_string(),
            username: cached.username,
            email: cached.email,
            credentials,
            created_at: cached.created_at,
            last_seen: Utc::now(),
        };

        // Refresh the entry so activity extends its lifetime.
        self.cache_session(&session).await;

        debug!(
            session_id,
            username = %session.username,
            "User session loaded from cache"
        );
        Some(session)
    }

    /// Encrypt and cache a session. Caching is best-effort: failures are
    /// logged and swallowed.
    async fn cache_session(&self, session: &Session) {
        let plaintext = match serde_json::to_vec(&session.credentials) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                warn!(error = %e, "Failed to serialize credential bundle for caching");
                return;
            }
        };

        let encrypted = match self.cipher.encrypt(&plaintext) {
            Ok(encrypted) => encrypted,
            Err(e) => {
                warn!(error = %e, "Failed to encrypt credential bundle for caching");
                return;
            }
        };

        let cached = CachedSession {
            username: session.username.clone(),
            email: session.email.clone(),
            encrypted_credentials: encrypted,
            created_at: session.created_at,
            last_seen: session.last_seen,
        };

        let key = keys::session(&session.session_id);
        if let Err(e) = self.cache.set_json(&key, &cached, self.session_ttl).await {
            warn!(error = %e, "Failed to cache session");
        }
    }
}
