//! Ownership checks for document mutations.
//!
//! Reads never consult the guard. Mutations that delete a document, or that
//! remove entries from a collection governed by the document owner, must be
//! made by that owner.

use tracing::debug;

use super::{Error, UserId};

/// Documents with a single owning user.
pub trait Owned {
    /// The user allowed to mutate the document.
    fn owner_id(&self) -> &UserId;
}

/// Outcome of an ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Denied,
}

/// Decides whether a principal may mutate a document.
///
/// # Examples
/// ```
/// use devhub::domain::{Access, OwnershipGuard, Post, Text, UserId, UserSummary};
///
/// let author = UserSummary { id: UserId::random(), name: "Ada".into(), avatar: String::new() };
/// let post = Post::new(&author, Text::new("hi").unwrap(), chrono::Utc::now());
/// assert_eq!(OwnershipGuard::authorize(&post, &author.id), Access::Allowed);
/// assert_eq!(OwnershipGuard::authorize(&post, &UserId::random()), Access::Denied);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnershipGuard;

impl OwnershipGuard {
    /// Compare the principal against the document owner.
    pub fn authorize<D: Owned + ?Sized>(document: &D, principal: &UserId) -> Access {
        if document.owner_id() == principal {
            Access::Allowed
        } else {
            Access::Denied
        }
    }

    /// Like [`OwnershipGuard::authorize`], but turns a denial into a
    /// [`Forbidden`](super::ErrorCode::Forbidden) error.
    pub fn ensure<D: Owned + ?Sized>(document: &D, principal: &UserId) -> Result<(), Error> {
        match Self::authorize(document, principal) {
            Access::Allowed => Ok(()),
            Access::Denied => {
                debug!(%principal, owner = %document.owner_id(), "ownership check denied");
                Err(Error::forbidden("user is not authorized"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    struct Doc(UserId);

    impl Owned for Doc {
        fn owner_id(&self) -> &UserId {
            &self.0
        }
    }

    #[rstest]
    fn owner_is_allowed() {
        let owner = UserId::random();
        assert!(OwnershipGuard::ensure(&Doc(owner), &owner).is_ok());
    }

    #[rstest]
    fn other_principal_is_forbidden() {
        let err = OwnershipGuard::ensure(&Doc(UserId::random()), &UserId::random())
            .expect_err("denied");
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(err.message(), "user is not authorized");
    }
}
