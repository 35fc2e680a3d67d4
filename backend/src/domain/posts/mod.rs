//! Post aggregate service.
//!
//! Implements [`PostsCommand`] and [`PostsQuery`] over a [`DocumentStore`].
//! Every mutation of an existing post runs under the post's entry in a
//! [`DocumentLocks`] registry: load, edit through the
//! [`EmbeddedCollectionEditor`], then replace the whole document.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{AddCommentRequest, DocumentStore, PostsCommand, RemoveCommentRequest};
use crate::domain::storage::map_store_error;
use crate::domain::{
    Comment, DocumentLocks, EditError, EmbeddedCollectionEditor, Error, Like, OwnershipGuard,
    Post, PostId, Text, UserId, UserSummary,
};

mod query_impl;

/// Domain service implementing the post driving ports.
#[derive(Clone)]
pub struct PostsService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    locks: Arc<DocumentLocks<PostId>>,
}

impl<S> PostsService<S> {
    /// Create a service over `store`, stamping new documents with `clock`.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            locks: Arc::new(DocumentLocks::new()),
        }
    }
}

fn post_not_found() -> Error {
    Error::not_found("post not found")
}

fn edit_failed(err: EditError, post_id: &PostId, entry_kind: &str) -> Error {
    debug!(%post_id, code = err.code(), "post edit rejected");
    err.into_domain(entry_kind)
}

impl<S> PostsService<S>
where
    S: DocumentStore,
{
    pub(super) async fn load_post(&self, post_id: &PostId) -> Result<Post, Error> {
        self.store
            .find_post(post_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(post_not_found)
    }

    async fn load_user(&self, user_id: &UserId) -> Result<UserSummary, Error> {
        self.store
            .find_user(user_id)
            .await
            .map_err(map_store_error)?
            .map(|user| user.summary())
            .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn persist(&self, post: &Post) -> Result<(), Error> {
        self.store.save_post(post).await.map_err(map_store_error)
    }
}

#[async_trait]
impl<S> PostsCommand for PostsService<S>
where
    S: DocumentStore,
{
    async fn create_post(&self, author: &UserId, text: Text) -> Result<Post, Error> {
        let summary = self.load_user(author).await?;
        let post = Post::new(&summary, text, self.clock.utc());
        self.persist(&post).await?;
        info!(post_id = %post.id, author_id = %author, "post created");
        Ok(post)
    }

    async fn delete_post(&self, principal: &UserId, post_id: &PostId) -> Result<(), Error> {
        let _guard = self.locks.lock(*post_id).await;
        let post = self.load_post(post_id).await?;
        OwnershipGuard::ensure(&post, principal)?;
        self.store
            .remove_post(post_id)
            .await
            .map_err(map_store_error)?;
        info!(%post_id, "post removed");
        Ok(())
    }

    async fn like_post(&self, principal: &UserId, post_id: &PostId) -> Result<Vec<Like>, Error> {
        let _guard = self.locks.lock(*post_id).await;
        let mut post = self.load_post(post_id).await?;
        EmbeddedCollectionEditor::new(&mut post.likes)
            .toggle_like(*principal)
            .map_err(|err| edit_failed(err, post_id, "like"))?;
        self.persist(&post).await?;
        Ok(post.likes)
    }

    async fn unlike_post(
        &self,
        principal: &UserId,
        post_id: &PostId,
    ) -> Result<Vec<Like>, Error> {
        let _guard = self.locks.lock(*post_id).await;
        let mut post = self.load_post(post_id).await?;
        EmbeddedCollectionEditor::new(&mut post.likes)
            .remove_like(principal)
            .map_err(|err| edit_failed(err, post_id, "like"))?;
        self.persist(&post).await?;
        Ok(post.likes)
    }

    async fn add_comment(&self, request: AddCommentRequest) -> Result<Vec<Comment>, Error> {
        let AddCommentRequest {
            post_id,
            user_id,
            text,
        } = request;
        let commenter = self.load_user(&user_id).await?;

        let _guard = self.locks.lock(post_id).await;
        let mut post = self.load_post(&post_id).await?;
        let comment = Comment::new(&commenter, text, self.clock.utc());
        EmbeddedCollectionEditor::new(&mut post.comments).insert_front(comment);
        self.persist(&post).await?;
        Ok(post.comments)
    }

    async fn remove_comment(&self, request: RemoveCommentRequest) -> Result<Vec<Comment>, Error> {
        let RemoveCommentRequest {
            post_id,
            comment_id,
            user_id,
        } = request;

        let _guard = self.locks.lock(post_id).await;
        let mut post = self.load_post(&post_id).await?;
        // Only the post author may prune comments, including other users' ones.
        OwnershipGuard::ensure(&post, &user_id)?;
        EmbeddedCollectionEditor::new(&mut post.comments)
            .remove_by_id(&comment_id)
            .map_err(|err| edit_failed(err, &post_id, "comment"))?;
        self.persist(&post).await?;
        Ok(post.comments)
    }
}
