//! Authentication routes configuration
//!
//! Defines the two-factor HTTP endpoints. Every endpoint acts on the
//! `user_id` from the request body without authenticating the caller, so the
//! scope must be mounted behind an authentication layer that binds the session
//! to that id.

use crate::auth::handlers::{
    disable_two_factor, enable_two_factor, generate_backup_codes, setup_two_factor,
    validate_two_factor,
};
use actix_web::{web, Scope};

/// Configure the 2FA routes under `/auth`
pub fn configure_auth_routes() -> Scope {
    web::scope("/auth")
        .route("/setup-2fa", web::post().to(setup_two_factor))
        .route("/enable-2fa", web::post().to(enable_two_factor))
        .route("/validate-2fa", web::post().to(validate_two_factor))
        .route("/disable-2fa", web::post().to(disable_two_factor))
        .route("/backup-codes", web::post().to(generate_backup_codes))
}
