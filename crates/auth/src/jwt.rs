//! Access token expiry decoding

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::claims::AccessClaims;
use crate::error::AuthError;

/// Read the `exp` claim of an access token.
///
/// The token is issued and verified by Jobber; only its payload is read here,
/// so signature and time-based checks are disabled. A token without a
/// numeric `exp` claim is malformed.
pub fn decode_access_expiry(token: &str) -> Result<DateTime<Utc>, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;

    let token_data = decode::<AccessClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| {
            tracing::debug!(error = %e, "Access token could not be decoded");
            AuthError::MalformedToken
        })?;

    DateTime::from_timestamp(token_data.claims.exp, 0).ok_or(AuthError::MalformedToken)
}
