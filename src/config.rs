//! Configuration management for hudur_auth
//!
//! Loads the app configuration from environment variables (after `.env` has
//! been applied by the binary) with defaults for everything.

use crate::types::{ApiError, AppConfig, MfaConfig, ServerConfig};
use std::env;
use std::time::Duration;

/// Load complete app configuration from the process environment
pub fn load_config() -> Result<AppConfig, ApiError> {
    load_config_from(|key| env::var(key).ok())
}

/// Load configuration through an arbitrary variable lookup
pub fn load_config_from<F>(lookup: F) -> Result<AppConfig, ApiError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = AppConfig {
        server: load_server_config(&lookup),
        mfa: load_mfa_config(&lookup),
        cors_origins: load_cors_origins(&lookup),
        log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
    };

    validate_config(&config)?;
    Ok(config)
}

fn load_server_config<F>(lookup: &F) -> ServerConfig
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = ServerConfig::default();
    ServerConfig {
        host: lookup("SERVER_HOST").unwrap_or(defaults.host),
        port: lookup("SERVER_PORT").and_then(|p| p.parse().ok()).unwrap_or(defaults.port),
        workers: lookup("SERVER_WORKERS").and_then(|w| w.parse().ok()).unwrap_or(defaults.workers),
        keep_alive: lookup("SERVER_KEEP_ALIVE")
            .and_then(|ka| ka.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.keep_alive),
    }
}

fn load_mfa_config<F>(lookup: &F) -> MfaConfig
where
    F: Fn(&str) -> Option<String>,
{
    MfaConfig {
        issuer: lookup("MFA_ISSUER").unwrap_or_else(|| MfaConfig::default().issuer),
    }
}

fn load_cors_origins<F>(lookup: &F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup("CORS_ORIGINS")
        .map(|origins| {
            origins.split(',').map(|o| o.trim().to_string()).filter(|o| !o.is_empty()).collect()
        })
        .unwrap_or_else(|| vec!["*".to_string()])
}

fn validate_config(config: &AppConfig) -> Result<(), ApiError> {
    if config.server.host.trim().is_empty() {
        return Err(ApiError::Config {
            message: "Server host can't be empty".to_string(),
        });
    }

    if config.server.port == 0 {
        return Err(ApiError::Config {
            message: "Server port must be non-zero".to_string(),
        });
    }

    if config.mfa.issuer.trim().is_empty() {
        return Err(ApiError::Config {
            message: "MFA issuer can't be empty".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = load_config_from(|_| None).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.mfa.issuer, "AttendancePro");
        assert_eq!(config.cors_origins, vec!["*"]);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let config = load_config_from(lookup_from(&[
            ("SERVER_HOST", "0.0.0.0"),
            ("SERVER_PORT", "9090"),
            ("SERVER_WORKERS", "2"),
            ("MFA_ISSUER", "Hudur"),
            ("CORS_ORIGINS", "https://app.example.com, https://admin.example.com"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.workers, 2);
        assert_eq!(config.mfa.issuer, "Hudur");
        assert_eq!(config.cors_origins, vec!["https://app.example.com", "https://admin.example.com"]);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_unparsable_port_falls_back() {
        let config = load_config_from(lookup_from(&[("SERVER_PORT", "eighty")])).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(load_config_from(lookup_from(&[("MFA_ISSUER", "  ")])).is_err());
        assert!(load_config_from(lookup_from(&[("SERVER_PORT", "0")])).is_err());
        assert!(load_config_from(lookup_from(&[("SERVER_HOST", "")])).is_err());
    }
}
