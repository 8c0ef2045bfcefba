//! Request extractors shared by protected handlers.
//!
//! - [`auth::AuthUser`] -- the user behind a valid JWT Bearer token.

pub mod auth;
