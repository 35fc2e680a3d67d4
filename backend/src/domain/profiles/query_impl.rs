//! Query implementation for the profiles service.
//!
//! Owner identity is joined live on every read, unlike post snapshots.

use async_trait::async_trait;

use crate::domain::ports::{DocumentStore, ProfilesQuery};
use crate::domain::storage::map_store_error;
use crate::domain::{Error, Profile, ProfileView, UserId};

use super::ProfilesService;

impl<S> ProfilesService<S>
where
    S: DocumentStore,
{
    async fn view(&self, profile: Profile) -> Result<ProfileView, Error> {
        let user = self
            .store
            .find_user(&profile.user_id)
            .await
            .map_err(map_store_error)?
            .map(|user| user.summary());
        Ok(ProfileView { profile, user })
    }
}

#[async_trait]
impl<S> ProfilesQuery for ProfilesService<S>
where
    S: DocumentStore,
{
    async fn own_profile(&self, principal: &UserId) -> Result<ProfileView, Error> {
        let profile = self.load_own(principal).await?;
        self.view(profile).await
    }

    async fn profile_by_user(&self, user_id: &UserId) -> Result<ProfileView, Error> {
        let profile = self
            .find_profile(user_id)
            .await?
            .ok_or_else(|| Error::not_found("profile not found"))?;
        self.view(profile).await
    }

    async fn list_profiles(&self) -> Result<Vec<ProfileView>, Error> {
        let mut profiles = self.store.list_profiles().await.map_err(map_store_error)?;
        profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let mut views = Vec::with_capacity(profiles.len());
        for profile in profiles {
            views.push(self.view(profile).await?);
        }
        Ok(views)
    }
}
