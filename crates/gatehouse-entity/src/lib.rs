//! # gatehouse-entity
//!
//! Domain entity models for Gatehouse: durable user records owned by the
//! token registry, and the ephemeral sessions derived from them.

pub mod credentials;
pub mod session;
pub mod user;

pub use credentials::CredentialBundle;
pub use session::{CachedSession, Session};
pub use user::{UserRecord, UserSummary};
