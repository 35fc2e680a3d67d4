//! Shared builders for domain service tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::{Email, User, UserId};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

/// A stored user whose password hash is the plain password with a prefix.
pub(crate) fn stored_user(name: &str, email: &str) -> User {
    let email = Email::new(email).expect("fixture email");
    User {
        id: UserId::random(),
        name: name.to_owned(),
        avatar: email.gravatar_url(),
        email,
        password_hash: "fixture-hash:secret1".to_owned(),
        created_at: fixture_timestamp(),
    }
}
