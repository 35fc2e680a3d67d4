//! Query implementation for the posts service.

use async_trait::async_trait;

use crate::domain::ports::{DocumentStore, PostsQuery};
use crate::domain::storage::map_store_error;
use crate::domain::{Error, Post, PostId};

use super::PostsService;

#[async_trait]
impl<S> PostsQuery for PostsService<S>
where
    S: DocumentStore,
{
    async fn list_posts(&self) -> Result<Vec<Post>, Error> {
        let mut posts = self.store.list_posts().await.map_err(map_store_error)?;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn get_post(&self, post_id: &PostId) -> Result<Post, Error> {
        self.load_post(post_id).await
    }
}
