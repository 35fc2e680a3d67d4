//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory_store**: process-local `DocumentStore` backed by hash maps
//! - **token_auth**: opaque bearer tokens plus bcrypt password hashing
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory_store;
pub mod token_auth;
