//! In-memory `DocumentStore` adapter.
//!
//! Documents live in hash maps behind a single async `RwLock`. Every port
//! call takes the lock once, which makes each call atomic; cross-call
//! consistency is the services' concern. Data is lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{DocumentStore, DocumentStoreError};
use crate::domain::{Email, Post, PostId, Profile, User, UserId};

#[derive(Debug, Default)]
struct Documents {
    users: HashMap<UserId, User>,
    /// Keyed by owning user; at most one profile per user.
    profiles: HashMap<UserId, Profile>,
    posts: HashMap<PostId, Post>,
}

/// Process-local document store.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<Documents>,
}

impl InMemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, DocumentStoreError> {
        Ok(self.documents.read().await.users.get(id).cloned())
    }

    async fn find_user_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<User>, DocumentStoreError> {
        Ok(self
            .documents
            .read()
            .await
            .users
            .values()
            .find(|user| user.email == *email)
            .cloned())
    }

    async fn save_user(&self, user: &User) -> Result<(), DocumentStoreError> {
        self.documents
            .write()
            .await
            .users
            .insert(user.id, user.clone());
        Ok(())
    }

    async fn remove_user(&self, id: &UserId) -> Result<bool, DocumentStoreError> {
        Ok(self.documents.write().await.users.remove(id).is_some())
    }

    async fn find_profile_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Profile>, DocumentStoreError> {
        Ok(self.documents.read().await.profiles.get(user_id).cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, DocumentStoreError> {
        Ok(self
            .documents
            .read()
            .await
            .profiles
            .values()
            .cloned()
            .collect())
    }

    async fn save_profile(&self, profile: &Profile) -> Result<(), DocumentStoreError> {
        self.documents
            .write()
            .await
            .profiles
            .insert(profile.user_id, profile.clone());
        Ok(())
    }

    async fn remove_profile_by_user(&self, user_id: &UserId) -> Result<bool, DocumentStoreError> {
        Ok(self.documents.write().await.profiles.remove(user_id).is_some())
    }

    async fn find_post(&self, id: &PostId) -> Result<Option<Post>, DocumentStoreError> {
        Ok(self.documents.read().await.posts.get(id).cloned())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, DocumentStoreError> {
        Ok(self.documents.read().await.posts.values().cloned().collect())
    }

    async fn save_post(&self, post: &Post) -> Result<(), DocumentStoreError> {
        self.documents
            .write()
            .await
            .posts
            .insert(post.id, post.clone());
        Ok(())
    }

    async fn remove_post(&self, id: &PostId) -> Result<bool, DocumentStoreError> {
        Ok(self.documents.write().await.posts.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{ProfileFields, ProfileInput, Text, UserSummary};
    use chrono::Utc;
    use rstest::{fixture, rstest};

    #[fixture]
    fn user() -> User {
        let email = Email::new("ada@example.com").expect("email");
        User {
            id: UserId::random(),
            name: "Ada".to_owned(),
            avatar: email.gravatar_url(),
            email,
            password_hash: "hash".to_owned(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn users_are_found_by_id_and_email(user: User) {
        let store = InMemoryDocumentStore::new();
        store.save_user(&user).await.expect("save");

        let by_id = store.find_user(&user.id).await.expect("find");
        let by_email = store
            .find_user_by_email(&Email::new("ADA@example.com").expect("email"))
            .await
            .expect("find");
        assert_eq!(by_id.as_ref(), Some(&user));
        assert_eq!(by_email.as_ref(), Some(&user));

        assert!(store.remove_user(&user.id).await.expect("remove"));
        assert!(!store.remove_user(&user.id).await.expect("remove again"));
    }

    #[rstest]
    #[tokio::test]
    async fn saving_a_profile_replaces_the_previous_one(user: User) {
        let store = InMemoryDocumentStore::new();
        let make = |status: &str| {
            let fields = ProfileFields::try_from(ProfileInput {
                status: Some(status.to_owned()),
                skills: Some("rust".to_owned()),
                ..ProfileInput::default()
            })
            .expect("fields");
            Profile::create(user.id, fields, Utc::now())
        };

        store.save_profile(&make("Developer")).await.expect("save");
        store.save_profile(&make("Lead")).await.expect("save");

        let profiles = store.list_profiles().await.expect("list");
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].status, "Lead");
    }

    #[rstest]
    #[tokio::test]
    async fn posts_are_replaced_wholesale(user: User) {
        let store = InMemoryDocumentStore::new();
        let summary: UserSummary = user.summary();
        let mut post = Post::new(&summary, Text::new("hello").expect("text"), Utc::now());
        store.save_post(&post).await.expect("save");

        post.text = Text::new("edited").expect("text");
        store.save_post(&post).await.expect("save");

        let stored = store.find_post(&post.id).await.expect("find").expect("present");
        assert_eq!(stored.text.as_str(), "edited");
        assert_eq!(store.list_posts().await.expect("list").len(), 1);
    }
}
