//! Inbound header contract.
//!
//! The transport layer is an external collaborator; these helpers define
//! only which headers carry the bearer token and the optional
//! session-scope identifier.

use http::HeaderMap;

/// Header carrying the opaque bearer token.
pub const USER_TOKEN_HEADER: &str = "x-user-token";

/// Header carrying the caller-supplied session-scope identifier.
pub const SESSION_SCOPE_HEADER: &str = "x-session-id";

/// Extract the bearer token from request headers.
pub fn user_token(headers: &HeaderMap) -> Option<&str> {
    non_empty_header(headers, USER_TOKEN_HEADER)
}

/// Extract the session-scope identifier from request headers.
pub fn session_scope(headers: &HeaderMap) -> Option<&str> {
    non_empty_header(headers, SESSION_SCOPE_HEADER)
}

fn non_empty_header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}
