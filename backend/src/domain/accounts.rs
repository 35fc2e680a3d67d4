//! Accounts service: registration, login, and principal resolution.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, info};

use crate::domain::ports::{AccountsCommand, AuthProvider, AuthProviderError, DocumentStore};
use crate::domain::storage::map_store_error;
use crate::domain::{
    Account, Credential, DocumentLocks, Email, Error, LoginCredentials, Registration, User,
    UserId,
};

/// Domain service implementing [`AccountsCommand`].
#[derive(Clone)]
pub struct AccountsService<S, A> {
    store: Arc<S>,
    auth: Arc<A>,
    clock: Arc<dyn Clock>,
    registrations: Arc<DocumentLocks<Email>>,
}

impl<S, A> AccountsService<S, A> {
    /// Create a new accounts service.
    pub fn new(store: Arc<S>, auth: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            auth,
            clock,
            registrations: Arc::new(DocumentLocks::new()),
        }
    }
}

fn map_auth_error(err: AuthProviderError) -> Error {
    error!(kind = err.kind(), error = %err, "auth provider failure");
    Error::internal("authentication provider error")
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

#[async_trait]
impl<S, A> AccountsCommand for AccountsService<S, A>
where
    S: DocumentStore,
    A: AuthProvider,
{
    async fn register(&self, registration: Registration) -> Result<Credential, Error> {
        // Serialise registrations per email so the uniqueness check holds.
        let _guard = self.registrations.lock(registration.email().clone()).await;

        let existing = self
            .store
            .find_user_by_email(registration.email())
            .await
            .map_err(map_store_error)?;
        if existing.is_some() {
            debug!(email = %registration.email(), "registration rejected: email taken");
            return Err(Error::conflict("User already exists"));
        }

        let password_hash = self
            .auth
            .hash_password(registration.password())
            .await
            .map_err(map_auth_error)?;
        let user = User {
            id: UserId::random(),
            name: registration.name().to_owned(),
            avatar: registration.email().gravatar_url(),
            email: registration.email().clone(),
            password_hash,
            created_at: self.clock.utc(),
        };
        self.store.save_user(&user).await.map_err(map_store_error)?;
        info!(user_id = %user.id, "user registered");

        self.auth.issue(&user.id).await.map_err(map_auth_error)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<Credential, Error> {
        let Some(user) = self
            .store
            .find_user_by_email(credentials.email())
            .await
            .map_err(map_store_error)?
        else {
            debug!("login rejected: unknown email");
            return Err(invalid_credentials());
        };

        let matches = self
            .auth
            .verify_password(credentials.password(), &user.password_hash)
            .await
            .map_err(map_auth_error)?;
        if !matches {
            debug!(user_id = %user.id, "login rejected: wrong password");
            return Err(invalid_credentials());
        }

        self.auth.issue(&user.id).await.map_err(map_auth_error)
    }

    async fn authenticate(&self, credential: &Credential) -> Result<UserId, Error> {
        self.auth
            .resolve(credential)
            .await
            .map_err(map_auth_error)?
            .ok_or_else(|| Error::unauthorized("token is not valid"))
    }

    async fn current_user(&self, principal: &UserId) -> Result<Account, Error> {
        self.store
            .find_user(principal)
            .await
            .map_err(map_store_error)?
            .map(|user| user.account())
            .ok_or_else(|| Error::not_found("user not found"))
    }
}
