//! User routes
//!
//! Configuration of the user-related HTTP endpoints.

use crate::user::handlers;
use actix_web::{web, Scope};

/// Configure user routes
pub fn configure_user_routes() -> Scope {
    web::scope("/users")
        // Register a user
        .route("", web::post().to(handlers::register_user))
        // Two-factor status
        .route("/{id}/2fa", web::get().to(handlers::get_two_factor_status))
}
