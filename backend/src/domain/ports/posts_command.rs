//! Driving port for post mutations.
//!
//! Inbound adapters hand over already-validated values ([`Text`], typed ids);
//! implementations own lookups, ownership checks, embedded collection edits,
//! and persistence.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Comment, EntryId, Error, Like, Post, PostId, Text, UserId, UserSummary};

/// Request to add a comment to a post.
#[derive(Debug, Clone)]
pub struct AddCommentRequest {
    /// Post receiving the comment.
    pub post_id: PostId,
    /// Commenting principal.
    pub user_id: UserId,
    /// Comment body.
    pub text: Text,
}

/// Request to remove a comment from a post.
#[derive(Debug, Clone)]
pub struct RemoveCommentRequest {
    /// Post holding the comment.
    pub post_id: PostId,
    /// Comment to remove.
    pub comment_id: EntryId,
    /// Principal requesting removal; must own the post.
    pub user_id: UserId,
}

/// Domain use-case port for creating and editing posts.
///
/// # Errors
///
/// All methods fail with:
/// - `NotFound` when the post (or the principal's user record) is absent.
/// - `Forbidden` when an owner-only mutation is attempted by someone else.
/// - `Conflict` for a repeated like or an unlike without a prior like.
/// - `InternalError` when persistence fails.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Create a post authored by `author`, snapshotting their name and avatar.
    async fn create_post(&self, author: &UserId, text: Text) -> Result<Post, Error>;

    /// Delete a post owned by `principal`.
    async fn delete_post(&self, principal: &UserId, post_id: &PostId) -> Result<(), Error>;

    /// Like a post once; returns the updated likes, newest first.
    async fn like_post(&self, principal: &UserId, post_id: &PostId) -> Result<Vec<Like>, Error>;

    /// Withdraw a like; returns the remaining likes.
    async fn unlike_post(&self, principal: &UserId, post_id: &PostId)
    -> Result<Vec<Like>, Error>;

    /// Prepend a comment; returns the updated comments, newest first.
    async fn add_comment(&self, request: AddCommentRequest) -> Result<Vec<Comment>, Error>;

    /// Remove a comment; returns the remaining comments.
    async fn remove_comment(&self, request: RemoveCommentRequest) -> Result<Vec<Comment>, Error>;
}

/// Fixture command that fabricates posts and knows no existing ones.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePostsCommand;

fn missing_post() -> Error {
    Error::not_found("post not found")
}

#[async_trait]
impl PostsCommand for FixturePostsCommand {
    async fn create_post(&self, author: &UserId, text: Text) -> Result<Post, Error> {
        let summary = UserSummary {
            id: *author,
            name: "Ada Lovelace".to_owned(),
            avatar: String::new(),
        };
        Ok(Post::new(&summary, text, Utc::now()))
    }

    async fn delete_post(&self, _principal: &UserId, _post_id: &PostId) -> Result<(), Error> {
        Err(missing_post())
    }

    async fn like_post(&self, _principal: &UserId, _post_id: &PostId) -> Result<Vec<Like>, Error> {
        Err(missing_post())
    }

    async fn unlike_post(
        &self,
        _principal: &UserId,
        _post_id: &PostId,
    ) -> Result<Vec<Like>, Error> {
        Err(missing_post())
    }

    async fn add_comment(&self, _request: AddCommentRequest) -> Result<Vec<Comment>, Error> {
        Err(missing_post())
    }

    async fn remove_comment(&self, _request: RemoveCommentRequest) -> Result<Vec<Comment>, Error> {
        Err(missing_post())
    }
}
