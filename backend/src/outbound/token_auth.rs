//! Opaque-token `AuthProvider` adapter with bcrypt password hashing.
//!
//! Tokens are 32 random bytes, hex encoded, handed to the client once. The
//! adapter keeps only a SHA-256 fingerprint of each token together with its
//! owner and expiry. Expired entries are pruned on lookup and on issue.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::{AuthProvider, AuthProviderError};
use crate::domain::{Credential, UserId};

const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone, Copy)]
struct IssuedToken {
    user_id: UserId,
    expires_at: DateTime<Utc>,
}

/// Token lifetime and hashing cost.
#[derive(Debug, Clone, Copy)]
pub struct TokenPolicy {
    /// How long an issued token stays valid.
    pub ttl: TimeDelta,
    /// bcrypt work factor (4..=31).
    pub bcrypt_cost: u32,
}

/// In-process token registry plus bcrypt hashing.
pub struct TokenAuthProvider {
    clock: Arc<dyn Clock>,
    policy: TokenPolicy,
    tokens: RwLock<HashMap<String, IssuedToken>>,
}

impl TokenAuthProvider {
    /// Create a provider with an empty token registry.
    pub fn new(clock: Arc<dyn Clock>, policy: TokenPolicy) -> Self {
        Self {
            clock,
            policy,
            tokens: RwLock::new(HashMap::new()),
        }
    }
}

fn fingerprint(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}

fn random_token() -> String {
    let mut bytes = [0_u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

async fn run_bcrypt<T, F>(job: F) -> Result<T, AuthProviderError>
where
    F: FnOnce() -> bcrypt::BcryptResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|err| AuthProviderError::hashing(err.to_string()))?
        .map_err(|err| AuthProviderError::hashing(err.to_string()))
}

#[async_trait]
impl AuthProvider for TokenAuthProvider {
    async fn resolve(&self, credential: &Credential) -> Result<Option<UserId>, AuthProviderError> {
        let key = fingerprint(credential.expose());
        let now = self.clock.utc();

        let Some(issued) = self.tokens.read().await.get(&key).copied() else {
            return Ok(None);
        };
        if issued.expires_at > now {
            return Ok(Some(issued.user_id));
        }

        debug!(user_id = %issued.user_id, "expired token presented");
        self.tokens.write().await.remove(&key);
        Ok(None)
    }

    async fn issue(&self, user_id: &UserId) -> Result<Credential, AuthProviderError> {
        let now = self.clock.utc();
        let expires_at = now
            .checked_add_signed(self.policy.ttl)
            .ok_or_else(|| AuthProviderError::issue("token expiry out of range"))?;
        let raw = random_token();

        let mut tokens = self.tokens.write().await;
        tokens.retain(|_, issued| issued.expires_at > now);
        tokens.insert(
            fingerprint(&raw),
            IssuedToken {
                user_id: *user_id,
                expires_at,
            },
        );
        Ok(Credential::new(raw))
    }

    async fn hash_password(&self, password: &str) -> Result<String, AuthProviderError> {
        let password = Zeroizing::new(password.to_owned());
        let cost = self.policy.bcrypt_cost;
        run_bcrypt(move || bcrypt::hash(password.as_str(), cost)).await
    }

    async fn verify_password(
        &self,
        password: &str,
        hash: &str,
    ) -> Result<bool, AuthProviderError> {
        let password = Zeroizing::new(password.to_owned());
        let hash = hash.to_owned();
        run_bcrypt(move || bcrypt::verify(password.as_str(), &hash)).await
    }
}
