//! Health Check Module
//!
//! Liveness endpoint for the two-factor service.

use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

use crate::{SERVICE_NAME, VERSION};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SimpleStatus {
    Healthy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleHealthResponse {
    pub service_status: SimpleStatus,
    pub service: String,
    pub version: String,
    pub timestamp: String,
    pub system: SimpleSystemInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleSystemInfo {
    pub os: String,
    pub arch: String,
    pub pid: u32,
}

impl SimpleSystemInfo {
    fn current() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            pid: std::process::id(),
        }
    }
}

/// `GET /health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(SimpleHealthResponse {
        service_status: SimpleStatus::Healthy,
        service: SERVICE_NAME.to_string(),
        version: VERSION.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        system: SimpleSystemInfo::current(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};

    #[actix_web::test]
    async fn test_health_endpoint() {
        let app = test::init_service(App::new().route("/health", web::get().to(health))).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["service_status"], "healthy");
        assert_eq!(body["service"], SERVICE_NAME);
    }
}
