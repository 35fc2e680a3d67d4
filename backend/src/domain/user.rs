//! User identity model and registration input.
//!
//! A user owns at most one profile and any number of posts. Identity fields
//! are immutable after registration; the stored password hash is never
//! exposed through the read models in this module.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::UserId;

/// Minimum accepted password length.
pub const PASSWORD_MIN_LEN: usize = 6;

const GRAVATAR_BASE: &str = "https://www.gravatar.com/avatar";

/// Validation errors returned by [`Registration::try_from_parts`] and [`Email::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    InvalidEmail,
    PasswordTooShort { min: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name is required"),
            Self::InvalidEmail => write!(f, "please include a valid email"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must contain at least {min} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Normalised email address (trimmed, lower-cased).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and normalise an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if !email_regex().is_match(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }

    /// Gravatar URL for this address (200px, PG-rated, mystery-person fallback).
    ///
    /// # Examples
    /// ```
    /// use devhub::domain::Email;
    ///
    /// let email = Email::new("Ada@Example.com").unwrap();
    /// assert!(email.gravatar_url().starts_with("https://www.gravatar.com/avatar/"));
    /// assert!(email.gravatar_url().ends_with("?s=200&r=pg&d=mm"));
    /// ```
    #[must_use]
    pub fn gravatar_url(&self) -> String {
        let digest = hex::encode(Sha256::digest(self.0.as_bytes()));
        format!("{GRAVATAR_BASE}/{digest}?s=200&r=pg&d=mm")
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated registration input.
///
/// ## Invariants
/// - `name` is trimmed and non-empty.
/// - `password` has at least [`PASSWORD_MIN_LEN`] characters and is zeroised
///   on drop.
#[derive(Debug, Clone)]
pub struct Registration {
    name: String,
    email: Email,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration fields.
    ///
    /// # Examples
    /// ```
    /// use devhub::domain::Registration;
    ///
    /// let reg = Registration::try_from_parts(" Ada ", "ada@example.com", "secret1").unwrap();
    /// assert_eq!(reg.name(), "Ada");
    /// ```
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, UserValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        let email = Email::new(email)?;
        if password.chars().count() < PASSWORD_MIN_LEN {
            return Err(UserValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LEN,
            });
        }
        Ok(Self {
            name: name.to_owned(),
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalised email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plain-text password as supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Stored user document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub avatar: String,
    /// Opaque hash produced by the auth provider.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Public identity used for snapshots and read-model joins.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            avatar: self.avatar.clone(),
        }
    }

    /// Account view of the user, without the password hash.
    #[must_use]
    pub fn account(&self) -> Account {
        Account {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            avatar: self.avatar.clone(),
            created_at: self.created_at,
        }
    }
}

/// Public identity fields of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub avatar: String,
}

/// The authenticated user's own account, returned by `GET /api/auth`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}
