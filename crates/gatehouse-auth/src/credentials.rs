//! Resolution of server-held downstream credentials.
//!
//! Credentials are never accepted from inbound requests; they come from
//! the server environment (or a secret manager injecting it) only.

use tracing::error;

use gatehouse_core::config::credentials::CredentialsConfig;
use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;
use gatehouse_entity::credentials::CredentialBundle;

/// Read the downstream credential bundle from the environment.
///
/// Both variables must be present and non-empty; anything else is a
/// server misconfiguration reported to the administrator, not the caller.
pub fn resolve_from_env(config: &CredentialsConfig) -> AppResult<CredentialBundle> {
    let email = read_var(&config.email_env);
    let api_key = read_var(&config.api_key_env);

    match (email, api_key) {
        (Some(email), Some(api_key)) => Ok(CredentialBundle::new(email, api_key)),
        _ => {
            error!(
                email_env = %config.email_env,
                api_key_env = %config.api_key_env,
                "Server misconfiguration: downstream credentials not set"
            );
            Err(AppError::configuration(
                "Server configuration error: contact administrator",
            ))
        }
    }
}

fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_core::error::ErrorKind;

    fn config(email_env: &str, api_key_env: &str) -> CredentialsConfig {
        CredentialsConfig {
            email_env: email_env.to_string(),
            api_key_env: api_key_env.to_string(),
        }
    }

    #[test]
    fn test_resolves_when_both_present() {
        // Env var names are unique per test to avoid cross-test races.
        unsafe {
            std::env::set_var("GH_TEST_RESOLVE_EMAIL", "ops@example.com");
            std::env::set_var("GH_TEST_RESOLVE_KEY", "k-123");
        }

        let bundle =
            resolve_from_env(&config("GH_TEST_RESOLVE_EMAIL", "GH_TEST_RESOLVE_KEY")).unwrap();
        assert_eq!(bundle.account_email, "ops@example.com");
        assert_eq!(bundle.api_key, "k-123");
    }

    #[test]
    fn test_missing_key_is_misconfiguration() {
        unsafe {
            std::env::set_var("GH_TEST_PARTIAL_EMAIL", "ops@example.com");
        }

        let err =
            resolve_from_env(&config("GH_TEST_PARTIAL_EMAIL", "GH_TEST_ABSENT_KEY")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_empty_value_is_misconfiguration() {
        unsafe {
            std::env::set_var("GH_TEST_EMPTY_EMAIL", "");
            std::env::set_var("GH_TEST_EMPTY_KEY", "k-123");
        }

        let err = resolve_from_env(&config("GH_TEST_EMPTY_EMAIL", "GH_TEST_EMPTY_KEY")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
