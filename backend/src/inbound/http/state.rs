//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountsCommand, FixtureAccountsCommand, FixturePostsCommand, FixturePostsQuery,
    FixtureProfilesCommand, FixtureProfilesQuery, PostsCommand, PostsQuery, ProfilesCommand,
    ProfilesQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountsCommand>,
    pub posts: Arc<dyn PostsCommand>,
    pub posts_query: Arc<dyn PostsQuery>,
    pub profiles: Arc<dyn ProfilesCommand>,
    pub profiles_query: Arc<dyn ProfilesQuery>,
}

impl Default for HttpState {
    /// State backed by the fixture ports; handy for handler tests and demos.
    ///
    /// # Examples
    /// ```
    /// use devhub::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::default();
    /// let _accounts = state.accounts.clone();
    /// ```
    fn default() -> Self {
        Self {
            accounts: Arc::new(FixtureAccountsCommand),
            posts: Arc::new(FixturePostsCommand),
            posts_query: Arc::new(FixturePostsQuery),
            profiles: Arc::new(FixtureProfilesCommand),
            profiles_query: Arc::new(FixtureProfilesQuery),
        }
    }
}
