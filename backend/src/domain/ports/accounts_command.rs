//! Driving port for registration, login, and principal resolution.
//!
//! Inbound adapters call this port to turn credentials into principals
//! without knowing how tokens are minted or passwords are stored.

use async_trait::async_trait;

use crate::domain::{Account, Credential, Error, LoginCredentials, Registration, UserId};

/// Domain use-case port for account operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsCommand: Send + Sync {
    /// Register a new user and issue a credential for them.
    ///
    /// Fails with `Conflict` when the email is already registered.
    async fn register(&self, registration: Registration) -> Result<Credential, Error>;

    /// Check email and password and issue a credential.
    ///
    /// Unknown emails and wrong passwords both fail with `Unauthorized`.
    async fn login(&self, credentials: LoginCredentials) -> Result<Credential, Error>;

    /// Resolve a bearer credential to its principal.
    async fn authenticate(&self, credential: &Credential) -> Result<UserId, Error>;

    /// The principal's own account.
    async fn current_user(&self, principal: &UserId) -> Result<Account, Error>;
}

/// Fixture accounts used until persistence is wired.
///
/// `ada@example.com` / `password` logs in; credentials are accepted only when
/// they equal [`FixtureAccountsCommand::TOKEN`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountsCommand;

impl FixtureAccountsCommand {
    /// The only credential the fixture accepts.
    pub const TOKEN: &'static str = "fixture-token";
    const USER_ID: &'static str = "123e4567-e89b-12d3-a456-426614174000";
    const EMAIL: &'static str = "ada@example.com";

    fn user_id() -> Result<UserId, Error> {
        UserId::new(Self::USER_ID)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
    }
}

#[async_trait]
impl AccountsCommand for FixtureAccountsCommand {
    async fn register(&self, registration: Registration) -> Result<Credential, Error> {
        if registration.email().as_ref() == Self::EMAIL {
            return Err(Error::conflict("User already exists"));
        }
        Ok(Credential::new(Self::TOKEN))
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<Credential, Error> {
        if credentials.email().as_ref() == Self::EMAIL && credentials.password() == "password" {
            Ok(Credential::new(Self::TOKEN))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }

    async fn authenticate(&self, credential: &Credential) -> Result<UserId, Error> {
        if credential.expose() == Self::TOKEN {
            Self::user_id()
        } else {
            Err(Error::unauthorized("token is not valid"))
        }
    }

    async fn current_user(&self, principal: &UserId) -> Result<Account, Error> {
        let email = crate::domain::Email::new(Self::EMAIL)
            .map_err(|err| Error::internal(format!("invalid fixture email: {err}")))?;
        Ok(Account {
            id: *principal,
            name: "Ada Lovelace".to_owned(),
            avatar: email.gravatar_url(),
            email,
            created_at: chrono::DateTime::UNIX_EPOCH,
        })
    }
}
