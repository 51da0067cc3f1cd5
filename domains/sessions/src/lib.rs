//! Sessions domain: login, session check, logout

pub mod api;

pub use api::{routes, SessionsState};
