use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use std::sync::Arc;

use hudur_auth::auth::mfa::TotpEngine;
use hudur_auth::config::load_config;
use hudur_auth::types::StartupError;
use hudur_auth::user::repository::{InMemoryUserRepository, UserRepository};
use hudur_auth::{configure, AppState, SERVICE_NAME, VERSION};

#[actix_web::main]
async fn main() -> Result<(), StartupError> {
    dotenvy::dotenv().ok();

    let config = load_config().map_err(|e| StartupError::Config(e.to_string()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let repository: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
    let state = AppState::new(repository, TotpEngine::new(config.mfa.issuer.clone()));

    let bind_address = (config.server.host.clone(), config.server.port);
    log::info!(
        "Starting {SERVICE_NAME} v{VERSION} on {}:{} (issuer {})",
        bind_address.0,
        bind_address.1,
        config.mfa.issuer
    );

    let cors_origins = config.cors_origins.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&cors_origins))
            .wrap(Logger::default())
            .app_data(state.repository.clone())
            .app_data(state.two_factor.clone())
            .configure(configure)
    })
    .workers(config.server.workers)
    .keep_alive(config.server.keep_alive)
    .bind(bind_address)
    .map_err(|e| StartupError::ServerBind(e.to_string()))?
    .run()
    .await
    .map_err(|e| StartupError::ServerBind(e.to_string()))
}

fn build_cors(origins: &[String]) -> Cors {
    if origins.iter().any(|o| o == "*") {
        return Cors::permissive();
    }

    origins
        .iter()
        .fold(Cors::default().allow_any_method().allow_any_header(), |cors, origin| {
            cors.allowed_origin(origin)
        })
}
