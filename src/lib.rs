//! Hudur Two-Factor Authentication Service
//!
//! TOTP two-factor authentication for the Waaed/Hudur platform, built with
//! Actix-web. Provides secret provisioning, code validation, backup codes and
//! the enable/disable lifecycle for user accounts.

pub mod auth;
pub mod config;
pub mod health;
pub mod types;
pub mod user;

use actix_web::web;
use std::sync::Arc;

use auth::mfa::{TotpEngine, TwoFactorService};
use user::repository::UserRepository;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SERVICE_NAME: &str = "hudur-auth";

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub repository: web::Data<dyn UserRepository>,
    pub two_factor: web::Data<TwoFactorService>,
}

impl AppState {
    pub fn new(repository: Arc<dyn UserRepository>, engine: TotpEngine) -> Self {
        let two_factor = TwoFactorService::new(repository.clone(), engine);
        Self {
            repository: web::Data::from(repository),
            two_factor: web::Data::new(two_factor),
        }
    }
}

/// Register every route of the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health))
        .service(auth::routes::configure_auth_routes())
        .service(user::routes::configure_user_routes());
}
