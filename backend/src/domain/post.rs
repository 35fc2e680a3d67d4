//! Post aggregate: text authored by a user plus embedded likes and comments.
//!
//! Author and commenter names and avatars are snapshots copied from the user
//! at write time. They are set once when the post or comment is created and
//! intentionally go stale if the user later changes their identity fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::embedded::{EmbeddedEntry, UserKeyed};
use super::ownership::Owned;
use super::{EntryId, PostId, UserId, UserSummary};

/// Validation error for post and comment bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("text is required")]
pub struct EmptyTextError;

/// Non-blank body text for posts and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Text(String);

impl Text {
    /// Validate that `raw` contains at least one non-whitespace character.
    ///
    /// The text is stored exactly as supplied.
    pub fn new(raw: impl Into<String>) -> Result<Self, EmptyTextError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(EmptyTextError);
        }
        Ok(Self(raw))
    }

    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Text> for String {
    fn from(value: Text) -> Self {
        value.0
    }
}

impl TryFrom<String> for Text {
    type Error = EmptyTextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Name and avatar copied from a user at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub name: String,
    pub avatar: String,
}

impl From<&UserSummary> for Snapshot {
    fn from(user: &UserSummary) -> Self {
        Self {
            name: user.name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

/// A single like; at most one per user within a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: EntryId,
    pub user_id: UserId,
}

impl EmbeddedEntry for Like {
    fn entry_id(&self) -> &EntryId {
        &self.id
    }
}

impl UserKeyed for Like {
    fn new_for(user_id: UserId) -> Self {
        Self {
            id: EntryId::random(),
            user_id,
        }
    }

    fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

/// A comment embedded in a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: EntryId,
    pub user_id: UserId,
    #[serde(flatten)]
    pub author: Snapshot,
    pub text: Text,
    pub created_at: DateTime<Utc>,
}

impl EmbeddedEntry for Comment {
    fn entry_id(&self) -> &EntryId {
        &self.id
    }
}

/// Post document.
///
/// ## Invariants
/// - `likes` holds at most one entry per `user_id`.
/// - Only `author_id` may delete the post or remove its comments.
/// - `likes` and `comments` are ordered newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    #[serde(flatten)]
    pub author: Snapshot,
    pub text: Text,
    pub created_at: DateTime<Utc>,
    pub likes: Vec<Like>,
    pub comments: Vec<Comment>,
}

impl Post {
    /// Build a fresh post with empty likes and comments.
    pub fn new(author: &UserSummary, text: Text, created_at: DateTime<Utc>) -> Self {
        Self {
            id: PostId::random(),
            author_id: author.id,
            author: Snapshot::from(author),
            text,
            created_at,
            likes: Vec::new(),
            comments: Vec::new(),
        }
    }
}

impl Owned for Post {
    fn owner_id(&self) -> &UserId {
        &self.author_id
    }
}

impl Comment {
    /// Build a comment snapshotting the commenter's identity.
    pub fn new(commenter: &UserSummary, text: Text, created_at: DateTime<Utc>) -> Self {
        Self {
            id: EntryId::random(),
            user_id: commenter.id,
            author: Snapshot::from(commenter),
            text,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ada() -> UserSummary {
        UserSummary {
            id: UserId::random(),
            name: "Ada".to_owned(),
            avatar: "https://avatar.test/ada".to_owned(),
        }
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t")]
    fn text_rejects_blank_input(#[case] raw: &str) {
        assert_eq!(Text::new(raw), Err(EmptyTextError));
    }

    #[rstest]
    fn new_post_starts_without_likes_or_comments() {
        let author = ada();
        let post = Post::new(&author, Text::new("hello").expect("text"), Utc::now());
        assert!(post.likes.is_empty());
        assert!(post.comments.is_empty());
        assert_eq!(post.author_id, author.id);
        assert_eq!(post.author.name, "Ada");
    }

    #[rstest]
    fn post_serialises_snapshot_inline() {
        let post = Post::new(&ada(), Text::new("hello").expect("text"), Utc::now());
        let value = serde_json::to_value(&post).expect("serialise post");
        assert_eq!(value.get("name").and_then(|v| v.as_str()), Some("Ada"));
        assert_eq!(value.get("text").and_then(|v| v.as_str()), Some("hello"));
        assert!(value.get("authorId").is_some());
    }
}
