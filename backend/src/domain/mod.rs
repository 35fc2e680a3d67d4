//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed domain entities used by the HTTP adapter
//! and the document store, plus the services that implement the driving
//! ports. Keep types free of transport concerns and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User, Post, Profile: the three stored document kinds.
//! - EmbeddedCollectionEditor: edits likes, comments, experience, education.
//! - OwnershipGuard: owner-only mutation checks.
//! - PostsService, ProfilesService, AccountsService: driving-port services.

pub mod accounts;
pub mod auth;
pub mod embedded;
pub mod error;
pub mod ids;
pub mod locks;
pub mod ownership;
pub mod ports;
pub mod post;
pub mod posts;
pub mod profile;
pub mod profiles;
mod storage;
pub mod trace_id;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::accounts::AccountsService;
pub use self::auth::{Credential, LoginCredentials, LoginValidationError};
pub use self::embedded::{EditError, EmbeddedCollectionEditor, EmbeddedEntry, UserKeyed};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{EntryId, IdValidationError, PostId, ProfileId, UserId};
pub use self::locks::{DocumentGuard, DocumentLocks};
pub use self::ownership::{Access, Owned, OwnershipGuard};
pub use self::post::{Comment, EmptyTextError, Like, Post, Snapshot, Text};
pub use self::posts::PostsService;
pub use self::profile::{
    Education, EducationInput, Experience, ExperienceInput, Profile, ProfileFields, ProfileInput,
    ProfileValidationError, ProfileView, Social, parse_skills,
};
pub use self::profiles::ProfilesService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Account, Email, PASSWORD_MIN_LEN, Registration, User, UserSummary, UserValidationError,
};
