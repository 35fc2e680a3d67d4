//! Port for credential issuance and password hashing.
//!
//! The domain never sees token formats or hash algorithms. Adapters decide
//! how credentials are minted and verified; the services only ask "who is
//! this?" and "does this password match?".

use async_trait::async_trait;

use crate::domain::{Credential, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by auth provider adapters.
    pub enum AuthProviderError {
        /// Password hashing or verification failed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// A credential could not be minted.
        Issue { message: String } => "credential issuance failed: {message}",
    }
}

/// Issues and resolves bearer credentials and hashes passwords.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve a credential to its principal.
    ///
    /// Returns `Ok(None)` for unknown, malformed, or expired credentials.
    async fn resolve(&self, credential: &Credential) -> Result<Option<UserId>, AuthProviderError>;

    /// Mint a new credential for `user_id`.
    async fn issue(&self, user_id: &UserId) -> Result<Credential, AuthProviderError>;

    /// Hash a plain-text password for storage.
    async fn hash_password(&self, password: &str) -> Result<String, AuthProviderError>;

    /// Check a plain-text password against a stored hash.
    async fn verify_password(&self, password: &str, hash: &str)
    -> Result<bool, AuthProviderError>;
}

const FIXTURE_TOKEN_PREFIX: &str = "fixture-token:";
const FIXTURE_HASH_PREFIX: &str = "fixture-hash:";

/// Deterministic provider for tests that do not exercise authentication.
///
/// Credentials are the user id with a fixed prefix; hashes are the password
/// with a fixed prefix.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthProvider;

#[async_trait]
impl AuthProvider for FixtureAuthProvider {
    async fn resolve(&self, credential: &Credential) -> Result<Option<UserId>, AuthProviderError> {
        Ok(credential
            .expose()
            .strip_prefix(FIXTURE_TOKEN_PREFIX)
            .and_then(|raw| UserId::new(raw).ok()))
    }

    async fn issue(&self, user_id: &UserId) -> Result<Credential, AuthProviderError> {
        Ok(Credential::new(format!("{FIXTURE_TOKEN_PREFIX}{user_id}")))
    }

    async fn hash_password(&self, password: &str) -> Result<String, AuthProviderError> {
        Ok(format!("{FIXTURE_HASH_PREFIX}{password}"))
    }

    async fn verify_password(
        &self,
        password: &str,
        hash: &str,
    ) -> Result<bool, AuthProviderError> {
        Ok(hash.strip_prefix(FIXTURE_HASH_PREFIX) == Some(password))
    }
}
