//! User handlers

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use super::dto::RegisterUserRequest;
use super::models::{User, UserSummary};
use super::repository::UserRepository;
use crate::auth::mfa::TwoFactorService;
use crate::types::ApiError;

/// Register a user so two-factor can be set up for it
pub async fn register_user(
    repository: web::Data<dyn UserRepository>,
    payload: web::Json<RegisterUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = User::new(payload.validated_email()?);
    repository.create(&user).await?;
    log::info!("Registered user {}", user.id);

    Ok(HttpResponse::Created().json(UserSummary::from(user)))
}

/// Two-factor state of a user
pub async fn get_two_factor_status(
    service: web::Data<TwoFactorService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let status = service.status(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(status))
}
