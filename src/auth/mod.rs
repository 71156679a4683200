//! Authentication module
//!
//! Two-factor authentication: the TOTP core under [`mfa`] and its HTTP endpoints.

pub mod handlers;
pub mod mfa;
pub mod routes;
