//! # gatehouse-auth
//!
//! The session materializer. Given an opaque bearer token and a
//! session-scope identifier, validates the token against the registry and
//! produces an authenticated [`Session`](gatehouse_entity::Session)
//! carrying server-held downstream credentials, backed by a short-lived
//! encrypted cache entry.

pub mod credentials;
pub mod crypto;
pub mod headers;
pub mod materializer;
pub mod token;

pub use crypto::SessionCipher;
pub use materializer::{SessionMaterializer, derive_session_id};
pub use token::generate_token;
