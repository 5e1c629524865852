//! Session claims carried by portal tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{PartnerId, UserId};

/// JWT claims for portal session tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Partner the portal user acts for.
    pub partner: Uuid,
    /// User's language code (e.g. `en_US`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a portal user.
    #[must_use]
    pub fn new(
        user_id: UserId,
        partner_id: PartnerId,
        lang: Option<&str>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.into_inner(),
            partner: partner_id.into_inner(),
            lang: lang.map(ToString::to_string),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId::from_uuid(self.sub)
    }

    /// Returns the partner ID from claims.
    #[must_use]
    pub const fn partner_id(&self) -> PartnerId {
        PartnerId::from_uuid(self.partner)
    }

    /// Returns the language code, if the session carries one.
    #[must_use]
    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }
}
