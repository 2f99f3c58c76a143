//! Integration tests for the authentication and session materialization flow.

use std::sync::Arc;
use std::time::Duration;

use gatehouse_auth::{SessionCipher, SessionMaterializer};
use gatehouse_cache::CacheManager;
use gatehouse_cache::keys;
use gatehouse_cache::memory::MemoryCacheProvider;
use gatehouse_cache::noop::NoopCacheProvider;
use gatehouse_core::config::cache::MemoryCacheConfig;
use gatehouse_core::error::ErrorKind;
use gatehouse_core::traits::cache::CacheProvider;
use gatehouse_entity::credentials::CredentialBundle;
use gatehouse_registry::TokenRegistry;

struct TestEnv {
    _dir: tempfile::TempDir,
    registry: Arc<TokenRegistry>,
    cache: CacheManager,
    materializer: SessionMaterializer,
}

fn test_env() -> TestEnv {
    let dir = tempfile::tempdir().unwrap();
    let registry = Arc::new(TokenRegistry::open(dir.path().join("users.json")));
    registry
        .add("alice", "T1", Some("alice@example.com"), None)
        .unwrap();

    let cache = CacheManager::from_provider(Arc::new(MemoryCacheProvider::new(
        &MemoryCacheConfig {
            max_capacity: 1000,
            time_to_live_seconds: 3600,
        },
    )));
    let cipher = SessionCipher::from_base64_key(&SessionCipher::generate_key()).unwrap();
    let materializer = SessionMaterializer::new(
        registry.clone(),
        cache.clone(),
        cipher,
        Duration::from_secs(3600),
    );

    TestEnv {
        _dir: dir,
        registry,
        cache,
        materializer,
    }
}

fn creds() -> CredentialBundle {
    CredentialBundle::new("ops@example.com", "server-held-api-key")
}

#[tokio::test]
async fn test_authenticate_success() {
    let env = test_env();

    let session = env
        .materializer
        .authenticate(Some("T1"), Some("sess-1"), &creds())
        .await
        .unwrap();

    assert_eq!(session.username, "alice");
    assert_eq!(session.email, "alice@example.com");
    assert_eq!(session.credentials, creds());
    assert!(session.session_id.starts_with("user_"));
}

#[tokio::test]
async fn test_same_scope_collapses_to_same_session() {
    let env = test_env();

    let first = env
        .materializer
        .authenticate(Some("T1"), Some("sess-1"), &creds())
        .await
        .unwrap();
    let second = env
        .materializer
        .authenticate(Some("T1"), Some("sess-1"), &creds())
        .await
        .unwrap();

    assert_eq!(first.session_id, second.session_id);
    // Second call was a cache hit: original creation time survives.
    assert_eq!(first.created_at, second.created_at);
    assert_eq!(second.credentials, creds());
}

#[tokio::test]
async fn test_different_scope_isolated_sessions() {
    let env = test_env();

    let first = env
        .materializer
        .authenticate(Some("T1"), Some("sess-1"), &creds())
        .await
        .unwrap();
    let second = env
        .materializer
        .authenticate(Some("T1"), Some("sess-2"), &creds())
        .await
        .unwrap();

    assert_ne!(first.session_id, second.session_id);
}

#[tokio::test]
async fn test_missing_token_rejected() {
    let env = test_env();

    let err = env
        .materializer
        .authenticate(None, Some("sess-1"), &creds())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingToken);
    assert!(err.is_auth_rejection());

    let err = env
        .materializer
        .authenticate(Some(""), Some("sess-1"), &creds())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingToken);
}

#[tokio::test]
async fn test_wrong_token_rejected() {
    let env = test_env();

    let err = env
        .materializer
        .authenticate(Some("wrong-token"), Some("sess-1"), &creds())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidToken);
    assert!(err.is_auth_rejection());
}

#[tokio::test]
async fn test_deactivation_overrides_cached_session() {
    let env = test_env();

    let session = env
        .materializer
        .authenticate(Some("T1"), Some("sess-1"), &creds())
        .await
        .unwrap();

    // The cached entry for this identifier still exists...
    assert!(
        env.cache
            .exists(&keys::session(&session.session_id))
            .await
            .unwrap()
    );

    // ...but the registry is consulted first, so deactivation wins.
    env.registry.set_active("alice", false).unwrap();
    let err = env
        .materializer
        .authenticate(Some("T1"), Some("sess-1"), &creds())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidToken);

    // Reactivation restores validity with the same token.
    env.registry.set_active("alice", true).unwrap();
    let restored = env
        .materializer
        .authenticate(Some("T1"), Some("sess-1"), &creds())
        .await
        .unwrap();
    assert_eq!(restored.session_id, session.session_id);
}

#[tokio::test]
async fn test_absent_scope_yields_unshareable_sessions() {
    let env = test_env();

    let first = env
        .materializer
        .authenticate(Some("T1"), None, &creds())
        .await
        .unwrap();
    let second = env
        .materializer
        .authenticate(Some("T1"), None, &creds())
        .await
        .unwrap();

    assert_ne!(first.session_id, second.session_id);
}

#[tokio::test]
async fn test_corrupt_cache_entry_is_a_miss() {
    let env = test_env();

    let session = env
        .materializer
        .authenticate(Some("T1"), Some("sess-1"), &creds())
        .await
        .unwrap();

    // Overwrite the entry with garbage; the next call must still succeed.
    env.cache
        .set(
            &keys::session(&session.session_id),
            "{ not json",
            Duration::from_secs(60),
        )
        .await
        .unwrap();

    let rebuilt = env
        .materializer
        .authenticate(Some("T1"), Some("sess-1"), &creds())
        .await
        .unwrap();
    assert_eq!(rebuilt.session_id, session.session_id);
    assert_eq!(rebuilt.credentials, creds());
}

#[tokio::test]
async fn test_tampered_credentials_are_a_miss() {
    let env = test_env();

    let session = env
        .materializer
        .authenticate(Some("T1"), Some("sess-1"), &creds())
        .await
        .unwrap();

    // Valid JSON, but the encrypted blob fails authentication.
    let key = keys::session(&session.session_id);
    let raw = env.cache.get(&key).await.unwrap().unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    value["encrypted_credentials"] = serde_json::Value::String("AAAAAAAAAAAAAAAAAAAA".into());
    env.cache
        .set(&key, &value.to_string(), Duration::from_secs(60))
        .await
        .unwrap();

    let rebuilt = env
        .materializer
        .authenticate(Some("T1"), Some("sess-1"), &creds())
        .await
        .unwrap();
    assert_eq!(rebuilt.credentials, creds());
}

#[tokio::test]
async fn test_cached_entry_never_stores_plaintext_key() {
    let env = test_env();

    let session = env
        .materializer
        .authenticate(Some("T1"), Some("sess-1"), &creds())
        .await
        .unwrap();

    let raw = env
        .cache
        .get(&keys::session(&session.session_id))
        .await
        .unwrap()
        .unwrap();
    assert!(!raw.contains("server-held-api-key"));
    assert!(raw.contains("alice"));
}

#[tokio::test]
async fn test_works_without_a_cache_backend() {
    let dir = tempfile::tempdir().unwrap();
    let registry = Arc::new(TokenRegistry::open(dir.path().join("users.json")));
    registry.add("alice", "T1", None, None).unwrap();

    let cache = CacheManager::from_provider(Arc::new(NoopCacheProvider));
    let cipher = SessionCipher::from_base64_key(&SessionCipher::generate_key()).unwrap();
    let materializer =
        SessionMaterializer::new(registry, cache, cipher, Duration::from_secs(3600));

    let first = materializer
        .authenticate(Some("T1"), Some("sess-1"), &creds())
        .await
        .unwrap();
    let second = materializer
        .authenticate(Some("T1"), Some("sess-1"), &creds())
        .await
        .unwrap();

    // Same identifier, rematerialized each time.
    assert_eq!(first.session_id, second.session_id);
    assert_eq!(second.credentials, creds());
}

#[tokio::test]
async fn test_email_falls_back_to_username() {
    let env = test_env();
    env.registry.add("bob", "T2", None, None).unwrap();

    let session = env
        .materializer
        .authenticate(Some("T2"), Some("sess-1"), &creds())
        .await
        .unwrap();
    assert_eq!(session.email, "bob");
}
