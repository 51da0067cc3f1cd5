//! Axum extractors for the cookie session
//!
//! Works with any router state; the credentials come from the request's
//! cookies only.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

use crate::cookies::CredentialStore;
use crate::error::AuthError;
use crate::types::SessionCredentials;

/// Session credentials read from the `access_token` / `refresh_token` cookies.
///
/// Rejects with `MISSING_SESSION` when neither cookie is present. The tokens
/// are not validated here; the refresh guard does that before use.
#[derive(Debug)]
pub struct Session(pub SessionCredentials);

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let credentials = CredentialStore::load(&jar).ok_or(AuthError::MissingSession)?;
        Ok(Session(credentials))
    }
}
