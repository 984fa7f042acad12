//! Wire types exchanged with the shortening service.
//!
//! Field names follow the service's camelCase JSON; Rust-side names are
//! snake case. Unknown fields in responses are ignored.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Path prefix under which the service resolves short codes.
pub const SHORT_LINK_PREFIX: &str = "/url/";

// =============================================================================
// RECORDS
// =============================================================================

/// A short link owned by the current session. Read-only on the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenedLink {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "originalUrl")]
    pub original_url: String,
    #[serde(rename = "shortCode")]
    pub short_code: String,
    #[serde(rename = "createdBy")]
    pub owner_id: String,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl ShortenedLink {
    /// Public address of this link under `public_base`.
    #[must_use]
    pub fn short_url(&self, public_base: &str) -> String {
        short_url(public_base, &self.short_code)
    }
}

/// Build `<public_base>/url/<short_code>`.
#[must_use]
pub fn short_url(public_base: &str, short_code: &str) -> String {
    format!("{}{SHORT_LINK_PREFIX}{short_code}", public_base.trim_end_matches('/'))
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CreateUrlRequest<'a> {
    #[serde(rename = "originalUrl")]
    pub original_url: &'a str,
}

// =============================================================================
// ERROR BODY
// =============================================================================

/// Failure body shape. Only `message` is read.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
