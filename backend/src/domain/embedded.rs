//! Editing engine for embedded collections (likes, comments, experience,
//! education).
//!
//! Every collection is ordered newest first. Removal always resolves the
//! target position with an explicit lookup before touching the list, so a
//! missing entry surfaces as [`EditError::NotFound`] and the list is never
//! spliced at a sentinel offset. Failed edits leave the collection exactly as
//! it was.
//!
//! The editor only mutates the in-memory snapshot of a document; callers
//! persist the whole document afterwards.

use super::{EntryId, Error, UserId};

/// Entries addressable by their own identifier.
pub trait EmbeddedEntry {
    /// Identifier of the entry within its parent document.
    fn entry_id(&self) -> &EntryId;
}

/// Entries keyed by the user who created them, with set semantics per user.
pub trait UserKeyed: Sized {
    /// Build a fresh entry for `user_id` with a new entry id.
    fn new_for(user_id: UserId) -> Self;

    /// The user the entry belongs to.
    fn user_id(&self) -> &UserId;
}

/// Failures raised by [`EmbeddedCollectionEditor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// The user already has an entry in a set-semantics collection.
    #[error("post already liked")]
    AlreadyLiked,
    /// The user has no entry to remove.
    #[error("post has not yet been liked")]
    NotLiked,
    /// No entry matched the lookup.
    #[error("entry not found")]
    NotFound,
}

impl EditError {
    /// Stable machine-readable code placed in error details.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::AlreadyLiked => "already_liked",
            Self::NotLiked => "not_liked",
            Self::NotFound => "entry_not_found",
        }
    }

    /// Convert into a domain error, naming the entry kind for `NotFound`.
    #[must_use]
    pub fn into_domain(self, entry_kind: &str) -> Error {
        let details = serde_json::json!({ "code": self.code() });
        match self {
            Self::AlreadyLiked | Self::NotLiked => Error::conflict(self.to_string()),
            Self::NotFound => Error::not_found(format!("{entry_kind} does not exist")),
        }
        .with_details(details)
    }
}

/// Mutable view over one embedded collection of a loaded document.
///
/// # Examples
/// ```
/// use devhub::domain::{EmbeddedCollectionEditor, EditError, Like, UserId};
///
/// let mut likes: Vec<Like> = Vec::new();
/// let user = UserId::random();
/// EmbeddedCollectionEditor::new(&mut likes).toggle_like(user).unwrap();
/// let again = EmbeddedCollectionEditor::new(&mut likes).toggle_like(user);
/// assert_eq!(again.unwrap_err(), EditError::AlreadyLiked);
/// assert_eq!(likes.len(), 1);
/// ```
#[derive(Debug)]
pub struct EmbeddedCollectionEditor<'a, T> {
    entries: &'a mut Vec<T>,
}

impl<'a, T> EmbeddedCollectionEditor<'a, T> {
    /// Wrap a collection for editing.
    pub fn new(entries: &'a mut Vec<T>) -> Self {
        Self { entries }
    }

    /// Prepend `entry` without any de-duplication.
    pub fn insert_front(self, entry: T) -> &'a T {
        let entries = self.entries;
        entries.insert(0, entry);
        &entries[0]
    }

    /// First position satisfying `predicate`, if any.
    pub fn position(&self, predicate: impl Fn(&T) -> bool) -> Option<usize> {
        self.entries.iter().position(predicate)
    }

    /// Remove the first entry satisfying `predicate`.
    ///
    /// The index is resolved before the list is mutated; when nothing
    /// matches the collection is left untouched.
    pub fn remove_by_index(self, predicate: impl Fn(&T) -> bool) -> Result<T, EditError> {
        let index = self.position(predicate).ok_or(EditError::NotFound)?;
        Ok(self.entries.remove(index))
    }
}

impl<'a, T: EmbeddedEntry> EmbeddedCollectionEditor<'a, T> {
    /// Remove the entry whose id equals `id`.
    pub fn remove_by_id(self, id: &EntryId) -> Result<T, EditError> {
        self.remove_by_index(|entry| entry.entry_id() == id)
    }
}

impl<'a, T: UserKeyed> EmbeddedCollectionEditor<'a, T> {
    /// Set-semantics insert: prepend an entry for `user_id` unless one exists.
    pub fn toggle_like(self, user_id: UserId) -> Result<&'a T, EditError> {
        if self.entries.iter().any(|entry| *entry.user_id() == user_id) {
            return Err(EditError::AlreadyLiked);
        }
        Ok(self.insert_front(T::new_for(user_id)))
    }

    /// Remove the entry belonging to `user_id`.
    ///
    /// Linear scan; per-document collections are expected to stay small.
    pub fn remove_like(self, user_id: &UserId) -> Result<T, EditError> {
        self.remove_by_index(|entry| entry.user_id() == user_id)
            .map_err(|_| EditError::NotLiked)
    }
}
