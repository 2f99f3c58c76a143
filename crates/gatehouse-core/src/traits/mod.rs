//! Core trait definitions shared across Gatehouse crates.

pub mod cache;

pub use cache::CacheProvider;
