//! Credential handling and session tokens.
//!
//! - [`password`] -- Argon2id password hashing, verification and length rules.
//! - [`jwt`] -- JWT access tokens and opaque refresh tokens.

pub mod jwt;
pub mod password;
