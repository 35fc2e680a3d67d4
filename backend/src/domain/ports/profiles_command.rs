//! Driving port for profile mutations.
//!
//! The principal is always the profile owner: every operation addresses the
//! caller's own profile, so ownership is implied by the lookup key.

use async_trait::async_trait;

use crate::domain::{Education, EntryId, Error, Experience, Profile, ProfileFields, UserId};

/// Domain use-case port for maintaining a user's profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfilesCommand: Send + Sync {
    /// Create the principal's profile, or merge `fields` into the existing one.
    async fn upsert_profile(&self, principal: &UserId, fields: ProfileFields)
    -> Result<Profile, Error>;

    /// Delete the principal's profile and user account.
    ///
    /// Posts authored by the user are left in place.
    async fn delete_profile(&self, principal: &UserId) -> Result<(), Error>;

    /// Prepend an experience entry.
    async fn add_experience(
        &self,
        principal: &UserId,
        experience: Experience,
    ) -> Result<Profile, Error>;

    /// Remove an experience entry by id.
    async fn remove_experience(
        &self,
        principal: &UserId,
        entry_id: &EntryId,
    ) -> Result<Profile, Error>;

    /// Prepend an education entry.
    async fn add_education(
        &self,
        principal: &UserId,
        education: Education,
    ) -> Result<Profile, Error>;

    /// Remove an education entry by id.
    async fn remove_education(
        &self,
        principal: &UserId,
        entry_id: &EntryId,
    ) -> Result<Profile, Error>;
}

/// Fixture command for principals that have no profile yet.
///
/// Upserts always create; every other mutation reports a missing profile.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfilesCommand;

fn missing_profile() -> Error {
    Error::not_found("there is no profile for this user")
}

#[async_trait]
impl ProfilesCommand for FixtureProfilesCommand {
    async fn upsert_profile(
        &self,
        principal: &UserId,
        fields: ProfileFields,
    ) -> Result<Profile, Error> {
        Ok(Profile::create(*principal, fields, chrono::Utc::now()))
    }

    async fn delete_profile(&self, _principal: &UserId) -> Result<(), Error> {
        Ok(())
    }

    async fn add_experience(
        &self,
        _principal: &UserId,
        _experience: Experience,
    ) -> Result<Profile, Error> {
        Err(missing_profile())
    }

    async fn remove_experience(
        &self,
        _principal: &UserId,
        _entry_id: &EntryId,
    ) -> Result<Profile, Error> {
        Err(missing_profile())
    }

    async fn add_education(
        &self,
        _principal: &UserId,
        _education: Education,
    ) -> Result<Profile, Error> {
        Err(missing_profile())
    }

    async fn remove_education(
        &self,
        _principal: &UserId,
        _entry_id: &EntryId,
    ) -> Result<Profile, Error> {
        Err(missing_profile())
    }
}
