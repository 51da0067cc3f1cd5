//! Shared utilities, configuration, and error handling for Jobsheet
//!
//! This crate provides common functionality used across the Jobsheet service:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Validating JSON extractor for request bodies

pub mod config;
pub mod error;
pub mod extractors;

pub use config::Config;
pub use error::{Error, Result};
pub use extractors::ValidatedJson;
