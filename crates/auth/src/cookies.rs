//! Cookie-backed credential store
//!
//! The token pair lives only in the client's HTTP-only cookies. The access
//! cookie expires with the access token; the refresh cookie is session-scoped
//! and only rewritten when a token is (re)issued.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use time::Duration;

use crate::guard::GuardOutcome;
use crate::types::{SessionCredentials, TokenPair};

/// Cookie name for the access token.
pub const ACCESS_COOKIE: &str = "access_token";
/// Cookie name for the refresh token.
pub const REFRESH_COOKIE: &str = "refresh_token";

#[derive(Debug, Clone, Copy)]
pub struct CredentialStore {
    secure: bool,
}

impl CredentialStore {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    /// Read the session's credentials; `None` when neither cookie is set.
    ///
    /// A refresh cookie alone still makes a session: the access cookie
    /// expires with its token, so the browser stops sending it.
    pub fn load(jar: &CookieJar) -> Option<SessionCredentials> {
        let read = |name: &str| {
            jar.get(name)
                .map(|c| c.value().to_string())
                .filter(|v| !v.is_empty())
        };
        let access_token = read(ACCESS_COOKIE);
        let refresh_token = read(REFRESH_COOKIE);

        if access_token.is_none() && refresh_token.is_none() {
            return None;
        }

        Some(SessionCredentials {
            access_token,
            refresh_token,
        })
    }

    /// Presence check only; the tokens are not inspected.
    pub fn has_session(jar: &CookieJar) -> bool {
        Self::load(jar).is_some()
    }

    /// Persist a freshly issued pair (after the authorization code exchange).
    pub fn store(&self, jar: CookieJar, pair: &TokenPair, now: DateTime<Utc>) -> CookieJar {
        let jar = jar.add(self.access_cookie(pair, now));
        match &pair.refresh_token {
            Some(refresh_token) => jar.add(self.refresh_cookie(refresh_token)),
            None => jar,
        }
    }

    /// Persist whatever the refresh guard changed.
    pub fn apply(&self, jar: CookieJar, outcome: &GuardOutcome, now: DateTime<Utc>) -> CookieJar {
        match outcome {
            GuardOutcome::Fresh(_) => jar,
            GuardOutcome::Refreshed {
                pair,
                refresh_rotated,
            } => {
                let jar = jar.add(self.access_cookie(pair, now));
                match (&pair.refresh_token, refresh_rotated) {
                    (Some(refresh_token), true) => jar.add(self.refresh_cookie(refresh_token)),
                    _ => jar,
                }
            }
        }
    }

    /// Expire both cookies.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.add(self.expired_cookie(ACCESS_COOKIE))
            .add(self.expired_cookie(REFRESH_COOKIE))
    }

    fn access_cookie(&self, pair: &TokenPair, now: DateTime<Utc>) -> Cookie<'static> {
        let max_age = pair.remaining_lifetime(now).num_seconds().max(0);
        Cookie::build((ACCESS_COOKIE, pair.access_token.clone()))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(Duration::seconds(max_age))
            .build()
    }

    fn refresh_cookie(&self, refresh_token: &str) -> Cookie<'static> {
        Cookie::build((REFRESH_COOKIE, refresh_token.to_string()))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .path("/")
            .build()
    }

    fn expired_cookie(&self, name: &'static str) -> Cookie<'static> {
        Cookie::build((name, String::new()))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(Duration::ZERO)
            .build()
    }
}
