//! Unverified access-token payload decoding.
//!
//! The backend signs its tokens; the client only needs the payload to know
//! who is signed in, so the signature is deliberately not checked here. The
//! server remains the authority on every request.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use kiogloss_core::UserId;

/// Payload of the backend's access token.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessClaims {
    /// Subject, which the backend sets to the user's email address.
    pub sub: String,
    /// Numeric user id.
    pub user_id: UserId,
    /// Granted role names, e.g. `ROLE_USER` or `ROLE_ADMIN`.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
    /// Issued-at as seconds since the Unix epoch.
    #[serde(default)]
    pub iat: i64,
}

impl AccessClaims {
    /// Whether the token has expired as of `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

#[derive(Debug, Error)]
pub enum ClaimsError {
    #[error("token is not a three-segment JWT")]
    Segments,
    #[error("token payload is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("token payload is not valid JSON: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Decode the payload segment of `token` without verifying its signature.
pub fn decode_unverified(token: &str) -> Result<AccessClaims, ClaimsError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(ClaimsError::Segments);
    };
    let bytes = URL_SAFE_NO_PAD.decode(payload)?;
    Ok(serde_json::from_slice(&bytes)?)
}
