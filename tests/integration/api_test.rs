//! API endpoint integration tests
//!
//! Drives the full router against a wiremock stand-in for Jobber's token
//! and GraphQL endpoints.

#![allow(dead_code)]

mod common;
mod jobs;
mod sessions;
