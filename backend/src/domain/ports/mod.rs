//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`DocumentStore`], [`AuthProvider`]) are implemented by
//! outbound adapters. Driving ports (`*Command`, `*Query`) are implemented by
//! domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod accounts_command;
mod auth_provider;
mod document_store;
mod posts_command;
mod posts_query;
mod profiles_command;
mod profiles_query;

#[cfg(test)]
pub use accounts_command::MockAccountsCommand;
pub use accounts_command::{AccountsCommand, FixtureAccountsCommand};
#[cfg(test)]
pub use auth_provider::MockAuthProvider;
pub use auth_provider::{AuthProvider, AuthProviderError, FixtureAuthProvider};
#[cfg(test)]
pub use document_store::MockDocumentStore;
pub use document_store::{DocumentStore, DocumentStoreError, FixtureDocumentStore};
#[cfg(test)]
pub use posts_command::MockPostsCommand;
pub use posts_command::{
    AddCommentRequest, FixturePostsCommand, PostsCommand, RemoveCommentRequest,
};
#[cfg(test)]
pub use posts_query::MockPostsQuery;
pub use posts_query::{FixturePostsQuery, PostsQuery};
#[cfg(test)]
pub use profiles_command::MockProfilesCommand;
pub use profiles_command::{FixtureProfilesCommand, ProfilesCommand};
#[cfg(test)]
pub use profiles_query::MockProfilesQuery;
pub use profiles_query::{FixtureProfilesQuery, ProfilesQuery};
