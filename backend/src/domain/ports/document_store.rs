//! Port for document persistence (users, profiles, posts).
//!
//! The store exposes whole-document load/replace operations and no partial
//! updates. Services serialise their read-modify-write cycles with
//! [`DocumentLocks`](crate::domain::DocumentLocks); the store itself only
//! guarantees that each individual call is atomic.

use async_trait::async_trait;

use crate::domain::{Email, Post, PostId, Profile, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by document store adapters.
    pub enum DocumentStoreError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "document store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "document store query failed: {message}",
    }
}

/// Port for document storage and retrieval.
///
/// `save_*` methods are upserts keyed by the document id; they replace any
/// existing document wholesale. `remove_*` methods report whether a document
/// was actually removed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    // --- Users ---

    /// Fetch a user by id.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, DocumentStoreError>;

    /// Fetch a user by normalised email.
    async fn find_user_by_email(&self, email: &Email)
    -> Result<Option<User>, DocumentStoreError>;

    /// Insert or replace a user.
    async fn save_user(&self, user: &User) -> Result<(), DocumentStoreError>;

    /// Remove a user; `Ok(false)` when no such user existed.
    async fn remove_user(&self, id: &UserId) -> Result<bool, DocumentStoreError>;

    // --- Profiles ---

    /// Fetch the profile owned by `user_id`.
    async fn find_profile_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Profile>, DocumentStoreError>;

    /// Every stored profile, in no particular order.
    async fn list_profiles(&self) -> Result<Vec<Profile>, DocumentStoreError>;

    /// Insert or replace a profile.
    async fn save_profile(&self, profile: &Profile) -> Result<(), DocumentStoreError>;

    /// Remove the profile owned by `user_id`.
    async fn remove_profile_by_user(&self, user_id: &UserId) -> Result<bool, DocumentStoreError>;

    // --- Posts ---

    /// Fetch a post by id.
    async fn find_post(&self, id: &PostId) -> Result<Option<Post>, DocumentStoreError>;

    /// Every stored post, in no particular order.
    async fn list_posts(&self) -> Result<Vec<Post>, DocumentStoreError>;

    /// Insert or replace a post.
    async fn save_post(&self, post: &Post) -> Result<(), DocumentStoreError>;

    /// Remove a post.
    async fn remove_post(&self, id: &PostId) -> Result<bool, DocumentStoreError>;
}

/// Fixture store that holds nothing and discards writes.
///
/// Use it where persistence behaviour is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDocumentStore;

#[async_trait]
impl DocumentStore for FixtureDocumentStore {
    async fn find_user(&self, _id: &UserId) -> Result<Option<User>, DocumentStoreError> {
        Ok(None)
    }

    async fn find_user_by_email(
        &self,
        _email: &Email,
    ) -> Result<Option<User>, DocumentStoreError> {
        Ok(None)
    }

    async fn save_user(&self, _user: &User) -> Result<(), DocumentStoreError> {
        Ok(())
    }

    async fn remove_user(&self, _id: &UserId) -> Result<bool, DocumentStoreError> {
        Ok(false)
    }

    async fn find_profile_by_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<Profile>, DocumentStoreError> {
        Ok(None)
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, DocumentStoreError> {
        Ok(Vec::new())
    }

    async fn save_profile(&self, _profile: &Profile) -> Result<(), DocumentStoreError> {
        Ok(())
    }

    async fn remove_profile_by_user(&self, _user_id: &UserId) -> Result<bool, DocumentStoreError> {
        Ok(false)
    }

    async fn find_post(&self, _id: &PostId) -> Result<Option<Post>, DocumentStoreError> {
        Ok(None)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, DocumentStoreError> {
        Ok(Vec::new())
    }

    async fn save_post(&self, _post: &Post) -> Result<(), DocumentStoreError> {
        Ok(())
    }

    async fn remove_post(&self, _id: &PostId) -> Result<bool, DocumentStoreError> {
        Ok(false)
    }
}
