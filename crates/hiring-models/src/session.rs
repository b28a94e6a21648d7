//! Login sessions.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::user::User;

/// Sessions expire this many hours after issuance.
pub const SESSION_TTL_HOURS: i64 = 24;

/// The single active session: a user bound to an opaque token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Issue a session at `issued_at`, expiring exactly [`SESSION_TTL_HOURS`] later.
    pub fn issue(user: User, token: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self {
            user,
            token: token.into(),
            expires_at: issued_at + Duration::hours(SESSION_TTL_HOURS),
        }
    }

    /// A session is expired once `now` is strictly past its expiry.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
