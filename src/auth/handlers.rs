//! Two-factor handlers
//!
//! The target account is the `user_id` in the request body, taken as given.
//! These handlers do not authenticate the caller: the service must sit behind
//! an authentication layer that only lets a session act on its own `user_id`.

use actix_web::{web, HttpResponse};

use crate::auth::mfa::dto::{
    BackupCodesResponse, CodeValidationResponse, TotpSetupResponse, TwoFactorCodeRequest,
    TwoFactorStateResponse, TwoFactorUserRequest,
};
use crate::auth::mfa::TwoFactorService;
use crate::types::ApiError;

const INVALID_CODE: &str = "Invalid verification code";

/// Start 2FA setup: returns the secret and provisioning URI for the authenticator app.
///
/// Replaces any pending secret. Without an authentication layer in front, any
/// caller could restart another user's enrollment.
pub async fn setup_two_factor(
    service: web::Data<TwoFactorService>,
    payload: web::Json<TwoFactorUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let setup = service.setup(payload.user_id).await?;
    Ok(HttpResponse::Ok().json(TotpSetupResponse::from(setup)))
}

/// Confirm the pending secret with a code and turn 2FA on
pub async fn enable_two_factor(
    service: web::Data<TwoFactorService>,
    payload: web::Json<TwoFactorCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    if !service.confirm(payload.user_id, payload.code()).await? {
        return Err(ApiError::Mfa(INVALID_CODE.to_string()));
    }

    Ok(HttpResponse::Ok().json(TwoFactorStateResponse {
        two_factor_enabled: true,
    }))
}

/// Check a login-time code
pub async fn validate_two_factor(
    service: web::Data<TwoFactorService>,
    payload: web::Json<TwoFactorCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    let valid = service.verify(payload.user_id, payload.code()).await?;
    Ok(HttpResponse::Ok().json(CodeValidationResponse {
        valid,
    }))
}

/// Turn 2FA off; requires a current code
pub async fn disable_two_factor(
    service: web::Data<TwoFactorService>,
    payload: web::Json<TwoFactorCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    if !service.disable_with_code(payload.user_id, payload.code()).await? {
        return Err(ApiError::Mfa(INVALID_CODE.to_string()));
    }

    Ok(HttpResponse::Ok().json(TwoFactorStateResponse {
        two_factor_enabled: false,
    }))
}

/// Issue a fresh batch of backup codes.
///
/// Only checks that the user exists; the caller's identity is not verified here.
pub async fn generate_backup_codes(
    service: web::Data<TwoFactorService>,
    payload: web::Json<TwoFactorUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let stored = service.generate_backup_codes(payload.user_id).await?;
    Ok(HttpResponse::Ok().json(BackupCodesResponse::from_stored(stored)))
}
