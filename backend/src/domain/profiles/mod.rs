//! Profile aggregate service.
//!
//! Implements [`ProfilesCommand`] and [`ProfilesQuery`]. Profiles are keyed
//! by their owner, so the per-document lock registry is keyed by [`UserId`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{DocumentStore, ProfilesCommand};
use crate::domain::storage::map_store_error;
use crate::domain::{
    DocumentLocks, EditError, Education, EmbeddedCollectionEditor, EntryId, Error, Experience,
    OwnershipGuard, Profile, ProfileFields, UserId,
};

mod query_impl;

/// Domain service implementing the profile driving ports.
#[derive(Clone)]
pub struct ProfilesService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    locks: Arc<DocumentLocks<UserId>>,
}

impl<S> ProfilesService<S> {
    /// Create a service over `store`.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            locks: Arc::new(DocumentLocks::new()),
        }
    }
}

fn no_profile() -> Error {
    Error::not_found("there is no profile for this user")
}

fn entry_removal_failed(err: EditError, principal: &UserId, entry_kind: &str) -> Error {
    debug!(%principal, code = err.code(), entry_kind, "profile entry removal rejected");
    err.into_domain(entry_kind)
}

impl<S> ProfilesService<S>
where
    S: DocumentStore,
{
    async fn find_profile(&self, user_id: &UserId) -> Result<Option<Profile>, Error> {
        self.store
            .find_profile_by_user(user_id)
            .await
            .map_err(map_store_error)
    }

    /// Load the principal's profile for mutation.
    async fn load_own(&self, principal: &UserId) -> Result<Profile, Error> {
        let profile = self.find_profile(principal).await?.ok_or_else(no_profile)?;
        OwnershipGuard::ensure(&profile, principal)?;
        Ok(profile)
    }

    async fn persist(&self, profile: &Profile) -> Result<(), Error> {
        self.store
            .save_profile(profile)
            .await
            .map_err(map_store_error)
    }

    /// Load, edit, and replace the principal's profile under its lock.
    async fn edit_own<F>(&self, principal: &UserId, edit: F) -> Result<Profile, Error>
    where
        F: FnOnce(&mut Profile) -> Result<(), Error> + Send,
    {
        let _guard = self.locks.lock(*principal).await;
        let mut profile = self.load_own(principal).await?;
        edit(&mut profile)?;
        self.persist(&profile).await?;
        Ok(profile)
    }
}

#[async_trait]
impl<S> ProfilesCommand for ProfilesService<S>
where
    S: DocumentStore,
{
    async fn upsert_profile(
        &self,
        principal: &UserId,
        fields: ProfileFields,
    ) -> Result<Profile, Error> {
        let _guard = self.locks.lock(*principal).await;
        let owner = self
            .store
            .find_user(principal)
            .await
            .map_err(map_store_error)?;
        if owner.is_none() {
            debug!(%principal, "profile upsert for a removed user");
            return Err(Error::not_found("user not found"));
        }
        let profile = match self.find_profile(principal).await? {
            Some(mut existing) => {
                OwnershipGuard::ensure(&existing, principal)?;
                existing.apply(fields);
                debug!(%principal, "profile updated");
                existing
            }
            None => {
                info!(%principal, "profile created");
                Profile::create(*principal, fields, self.clock.utc())
            }
        };
        self.persist(&profile).await?;
        Ok(profile)
    }

    async fn delete_profile(&self, principal: &UserId) -> Result<(), Error> {
        let _guard = self.locks.lock(*principal).await;
        self.store
            .remove_profile_by_user(principal)
            .await
            .map_err(map_store_error)?;
        self.store
            .remove_user(principal)
            .await
            .map_err(map_store_error)?;
        // Posts authored by the user are intentionally left behind.
        info!(%principal, "profile and user removed");
        Ok(())
    }

    async fn add_experience(
        &self,
        principal: &UserId,
        experience: Experience,
    ) -> Result<Profile, Error> {
        self.edit_own(principal, |profile| {
            EmbeddedCollectionEditor::new(&mut profile.experience).insert_front(experience);
            Ok(())
        })
        .await
    }

    async fn remove_experience(
        &self,
        principal: &UserId,
        entry_id: &EntryId,
    ) -> Result<Profile, Error> {
        self.edit_own(principal, |profile| {
            EmbeddedCollectionEditor::new(&mut profile.experience)
                .remove_by_id(entry_id)
                .map(drop)
                .map_err(|err| entry_removal_failed(err, principal, "experience"))
        })
        .await
    }

    async fn add_education(
        &self,
        principal: &UserId,
        education: Education,
    ) -> Result<Profile, Error> {
        self.edit_own(principal, |profile| {
            EmbeddedCollectionEditor::new(&mut profile.education).insert_front(education);
            Ok(())
        })
        .await
    }

    async fn remove_education(
        &self,
        principal: &UserId,
        entry_id: &EntryId,
    ) -> Result<Profile, Error> {
        self.edit_own(principal, |profile| {
            EmbeddedCollectionEditor::new(&mut profile.education)
                .remove_by_id(entry_id)
                .map(drop)
                .map_err(|err| entry_removal_failed(err, principal, "education"))
        })
        .await
    }
}
