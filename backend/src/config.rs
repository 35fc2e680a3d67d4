//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `DEVHUB_*` environment variables, and config
//! files, in OrthoConfig's usual precedence order.

use std::net::IpAddr;

use chrono::TimeDelta;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::token_auth::TokenPolicy;

/// Setting values that parse but cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `token_ttl_secs` is not positive or does not fit a duration.
    #[error("token_ttl_secs must be a positive number of seconds, got {0}")]
    TokenTtlOutOfRange(i64),
}

const DEFAULT_HOST: IpAddr = IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_TOKEN_TTL_SECS: i64 = 360_000;
const DEFAULT_BCRYPT_COST: u32 = 10;

/// Configuration values controlling the HTTP listener and credentials.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DEVHUB")]
pub struct ServerSettings {
    /// Address to bind.
    pub host: Option<IpAddr>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Lifetime of issued bearer tokens, in seconds.
    pub token_ttl_secs: Option<i64>,
    /// bcrypt work factor for stored password hashes.
    pub bcrypt_cost: Option<u32>,
}

impl ServerSettings {
    /// Return the configured bind address, falling back to all interfaces.
    pub fn host(&self) -> IpAddr {
        self.host.unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port, falling back to 5000.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Token lifetime and hashing cost for the credential adapter.
    ///
    /// # Errors
    /// [`SettingsError::TokenTtlOutOfRange`] when the configured lifetime is
    /// not positive or overflows [`TimeDelta`].
    pub fn token_policy(&self) -> Result<TokenPolicy, SettingsError> {
        let secs = self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        let ttl = TimeDelta::try_seconds(secs)
            .filter(|ttl| *ttl > TimeDelta::zero())
            .ok_or(SettingsError::TokenTtlOutOfRange(secs))?;
        Ok(TokenPolicy {
            ttl,
            bcrypt_cost: self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("devhub")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("DEVHUB_HOST", None::<String>),
            ("DEVHUB_PORT", None::<String>),
            ("DEVHUB_TOKEN_TTL_SECS", None::<String>),
            ("DEVHUB_BCRYPT_COST", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.host(), DEFAULT_HOST);
        assert_eq!(settings.port(), 5000);
        let policy = settings.token_policy().expect("default policy");
        assert_eq!(policy.ttl, TimeDelta::seconds(360_000));
        assert_eq!(policy.bcrypt_cost, 10);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("DEVHUB_HOST", Some("127.0.0.1".to_owned())),
            ("DEVHUB_PORT", Some("8080".to_owned())),
            ("DEVHUB_TOKEN_TTL_SECS", Some("60".to_owned())),
            ("DEVHUB_BCRYPT_COST", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.host().to_string(), "127.0.0.1");
        assert_eq!(settings.port(), 8080);
        let policy = settings.token_policy().expect("configured policy");
        assert_eq!(policy.ttl, TimeDelta::seconds(60));
        assert_eq!(policy.bcrypt_cost, 4);
    }

    #[rstest]
    #[case("0")]
    #[case("-5")]
    #[case("9223372036854775807")]
    fn unusable_token_lifetimes_are_rejected(#[case] ttl: &str) {
        let _guard = lock_env([
            ("DEVHUB_HOST", None::<String>),
            ("DEVHUB_PORT", None::<String>),
            ("DEVHUB_TOKEN_TTL_SECS", Some(ttl.to_owned())),
            ("DEVHUB_BCRYPT_COST", None::<String>),
        ]);

        let settings = load_from_empty_args();
        let expected: i64 = ttl.parse().expect("numeric ttl");
        let err = settings.token_policy().expect_err("unusable ttl");
        assert_eq!(err, SettingsError::TokenTtlOutOfRange(expected));
    }
}
