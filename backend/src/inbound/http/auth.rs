//! API key authentication for HTTP handlers.
//!
//! Keeps credential checks out of the handler bodies: handlers take an
//! [`ApiKeyGuard`] parameter and the extractor rejects the request before the
//! handler runs. The active [`ApiKeyPolicy`] is registered as app data at
//! startup.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use sha2::{Digest, Sha256};

use crate::domain::Error;

/// Header carrying the client's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Length of the logged fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Access policy for the resource routes, decided once at startup.
#[derive(Clone)]
pub enum ApiKeyPolicy {
    /// Admit every request. Used when no key is configured, such as local
    /// fixture mode.
    AllowAll,
    /// Require the configured key on every request.
    Require(String),
}

impl ApiKeyPolicy {
    /// Policy requiring `key` on every resource request.
    pub fn require(key: impl Into<String>) -> Self {
        Self::Require(key.into())
    }

    /// Policy admitting all requests.
    pub fn allow_all() -> Self {
        Self::AllowAll
    }

    /// Check a presented key against the policy.
    pub fn admit(&self, presented: Option<&str>) -> Result<(), Error> {
        match self {
            Self::AllowAll => Ok(()),
            Self::Require(expected) => match presented {
                None => Err(Error::unauthorized("missing API key")),
                Some(key) if key == expected => Ok(()),
                Some(_) => Err(Error::unauthorized("invalid API key")),
            },
        }
    }
}

/// Truncated SHA-256 fingerprint of an API key for startup logs.
///
/// The first 8 bytes of the hash as a 16-character hex string give operators
/// enough to tell keys apart without ever logging key material.
///
/// # Examples
///
/// ```rust
/// use backend::inbound::http::auth::key_fingerprint;
///
/// let fp = key_fingerprint("local-dev-key");
///
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

/// Extractor proving the request satisfied the API key policy.
///
/// When no policy is registered as app data the guard admits the request,
/// which keeps handler unit tests free of authentication setup.
pub struct ApiKeyGuard;

impl FromRequest for ApiKeyGuard {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let presented = req
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());
        let outcome = match req.app_data::<web::Data<ApiKeyPolicy>>() {
            Some(policy) => policy.admit(presented).map(|()| ApiKeyGuard),
            None => Ok(ApiKeyGuard),
        };
        ready(outcome)
    }
}
