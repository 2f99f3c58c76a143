//! # gatehouse-cache
//!
//! Cache provider implementations for Gatehouse. Supports three modes:
//!
//! - **memory**: In-process cache using [moka](https://crates.io/crates/moka)
//! - **redis**: Redis-backed cache using the [redis](https://crates.io/crates/redis) crate
//! - **none**: No-op provider for environments without a backing store
//!
//! The provider is selected at runtime based on configuration. The session
//! cache is best-effort everywhere: a missing or unreachable backend only
//! costs a recomputation, never correctness.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod noop;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CacheManager;
