//! Session handlers: authorization code login, presence check, logout

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use jobsheet_auth::{AuthError, CredentialStore};
use jobsheet_common::ValidatedJson;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::SessionsState;

/// Request body for `POST /login`
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// One-time authorization code from the Jobber redirect
    #[validate(required, length(min = 1))]
    pub auth_code: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

/// Exchange an authorization code and store the issued pair in cookies.
///
/// A missing or empty code is rejected with 400 before anything is sent
/// to the token endpoint, and no cookies are set.
pub async fn login(
    State(state): State<SessionsState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<MessageResponse>), AuthError> {
    let code = request.auth_code.unwrap_or_default();
    let now = Utc::now();

    let pair = state.tokens.exchange_code_at(&code, now).await?;
    let jar = state.store.store(jar, &pair, now);

    tracing::info!("Login successful");
    Ok((jar, MessageResponse::new("Login successful")))
}

/// Report whether a session cookie is present. Tokens are not validated.
pub async fn authenticate(jar: CookieJar) -> Result<Json<MessageResponse>, AuthError> {
    if CredentialStore::has_session(&jar) {
        Ok(MessageResponse::new("Success"))
    } else {
        Err(AuthError::MissingSession)
    }
}

/// Expire both session cookies.
pub async fn logout(
    State(state): State<SessionsState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    tracing::info!("Session cleared");
    (state.store.clear(jar), MessageResponse::new("Logged out"))
}
