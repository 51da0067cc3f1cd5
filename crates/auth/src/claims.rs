//! JWT claims types

use serde::{Deserialize, Serialize};

/// Claims read from a Jobber access token.
///
/// Only the expiry is consumed; the token is never verified locally.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Expires at (seconds since the Unix epoch)
    pub exp: i64,
}
