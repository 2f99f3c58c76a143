//! # gatehouse-registry
//!
//! The durable token registry. Holds the set of known users in memory,
//! mirrored to a JSON document on disk, and answers token validation for
//! the session materializer. Mutations go through the administrative
//! interface only; the registry is the single writer of user records.

pub mod registry;
pub mod store;

pub use registry::TokenRegistry;
pub use store::RegistryStore;
