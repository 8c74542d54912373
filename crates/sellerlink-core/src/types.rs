//! Session record for a seller account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authentication state for one seller account.
///
/// Only the session manager constructs or mutates these; everything else
/// reads them through the [`crate::TokenStore`]. The serialized form is the
/// durable token record: camelCase keys with an epoch-millisecond expiry,
/// stored under `tokens:<sellerId>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Bearer credential for outbound calls; absent until first authentication.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Credential used to mint a new access token.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Absolute expiry of `access_token`.
    #[serde(rename = "expiresOn", with = "chrono::serde::ts_milliseconds_option", default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Owning seller id; always equal to the store key the session lives under.
    pub seller_id: String,
}

impl Session {
    pub fn new(seller_id: impl Into<String>) -> Self {
        Self { access_token: None, refresh_token: None, expires_at: None, seller_id: seller_id.into() }
    }

    /// True when the session carries a non-empty access token that has not expired.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        let has_token = self.access_token.as_deref().is_some_and(|t| !t.is_empty());
        has_token && self.expires_at.is_some_and(|exp| now < exp)
    }

    /// True when the access token exists but its expiry has passed.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        self.access_token.is_some() && self.expires_at.is_some_and(|exp| now >= exp)
    }
}
