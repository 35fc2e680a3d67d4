//! Driving port for post reads.

use async_trait::async_trait;

use crate::domain::{Error, Post, PostId};

/// Domain use-case port for reading posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// Every post, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>, Error>;

    /// A single post; `NotFound` when absent.
    async fn get_post(&self, post_id: &PostId) -> Result<Post, Error>;
}

/// Fixture query over an empty feed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePostsQuery;

#[async_trait]
impl PostsQuery for FixturePostsQuery {
    async fn list_posts(&self) -> Result<Vec<Post>, Error> {
        Ok(Vec::new())
    }

    async fn get_post(&self, _post_id: &PostId) -> Result<Post, Error> {
        Err(Error::not_found("post not found"))
    }
}
