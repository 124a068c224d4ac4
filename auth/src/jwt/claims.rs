use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session claims carried by every issued credential.
///
/// The wire names (`email`, `adminUser`, `iat`, `exp`) are part of the public
/// token contract and must not change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Email of the authenticated user
    pub email: String,

    /// Capability flag granting access to admin-only operations
    #[serde(rename = "adminUser")]
    pub admin_user: bool,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user session starting now.
    ///
    /// # Arguments
    /// * `email` - Email of the authenticated user
    /// * `admin_user` - Whether the user holds the admin capability
    /// * `expiration_hours` - Hours until the credential expires
    pub fn for_user(email: impl Into<String>, admin_user: bool, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(expiration_hours);

        Self {
            email: email.into(),
            admin_user,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Override the validity window (Unix timestamps).
    pub fn with_window(mut self, iat: i64, exp: i64) -> Self {
        self.iat = iat;
        self.exp = exp;
        self
    }
}
