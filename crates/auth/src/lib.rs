//! Token lifecycle for the Jobber OAuth session
//!
//! Provides the authorization-code exchange, the pre-call refresh guard,
//! the cookie-backed credential store, and the `Session` axum extractor.
//! The server keeps no copy of the tokens; they live in the client's cookies.

mod claims;
mod client;
mod config;
mod cookies;
mod endpoint;
mod error;
mod exchange;
mod extractors;
mod guard;
mod jwt;
mod manager;
pub mod mock;
mod types;

pub use claims::AccessClaims;
pub use client::OAuthClient;
pub use config::OAuthConfig;
pub use cookies::{CredentialStore, ACCESS_COOKIE, REFRESH_COOKIE};
pub use endpoint::{TokenEndpoint, TokenEndpointError, TokenEndpointFactory};
pub use error::AuthError;
pub use extractors::Session;
pub use guard::GuardOutcome;
pub use jwt::decode_access_expiry;
pub use manager::TokenManager;
pub use types::{GrantRequest, SessionCredentials, TokenGrant, TokenPair};
