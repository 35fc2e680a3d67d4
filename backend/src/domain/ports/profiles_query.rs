//! Driving port for profile reads.
//!
//! Every read joins the owning user's live identity into a [`ProfileView`].

use async_trait::async_trait;

use crate::domain::{Error, ProfileView, UserId};

/// Domain use-case port for reading profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfilesQuery: Send + Sync {
    /// The authenticated principal's own profile.
    async fn own_profile(&self, principal: &UserId) -> Result<ProfileView, Error>;

    /// The profile owned by `user_id`; public.
    async fn profile_by_user(&self, user_id: &UserId) -> Result<ProfileView, Error>;

    /// Every profile, oldest first; public.
    async fn list_profiles(&self) -> Result<Vec<ProfileView>, Error>;
}

/// Fixture query over an empty profile directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfilesQuery;

#[async_trait]
impl ProfilesQuery for FixtureProfilesQuery {
    async fn own_profile(&self, _principal: &UserId) -> Result<ProfileView, Error> {
        Err(Error::not_found("there is no profile for this user"))
    }

    async fn profile_by_user(&self, _user_id: &UserId) -> Result<ProfileView, Error> {
        Err(Error::not_found("profile not found"))
    }

    async fn list_profiles(&self) -> Result<Vec<ProfileView>, Error> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[tokio::test]
    async fn fixture_query_has_no_profiles() {
        assert!(
            FixtureProfilesQuery
                .list_profiles()
                .await
                .expect("listed")
                .is_empty()
        );
        let err = FixtureProfilesQuery
            .profile_by_user(&UserId::random())
            .await
            .expect_err("absent");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
