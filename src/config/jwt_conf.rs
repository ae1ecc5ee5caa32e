use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// JWT configuration structure
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub jwt_secret: String,
    /// Token expiration time in hours
    pub token_expiration_hours: i64,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables
    ///
    /// Expected environment variables:
    /// - JWT_SECRET: Secret key for signing JWT tokens (required, min 32 chars)
    /// - JWT_TOKEN_EXPIRY_HOURS: Token expiration in hours (defaults to 24)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading JWT configuration from environment variables");

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| {
            error!("JWT_SECRET environment variable not found");
            ConfigError::EnvVarNotFound("JWT_SECRET".to_string())
        })?;
        debug!("JWT secret loaded (length: {} chars)", jwt_secret.len());

        let token_expiration_hours = env::var("JWT_TOKEN_EXPIRY_HOURS")
            .unwrap_or_else(|_| {
                warn!("JWT_TOKEN_EXPIRY_HOURS not set, using default: 24 hours");
                "24".to_string()
            })
            .parse::<i64>()
            .map_err(|e| {
                error!("Invalid JWT_TOKEN_EXPIRY_HOURS value: {}", e);
                ConfigError::InvalidValue(format!("JWT_TOKEN_EXPIRY_HOURS: {}", e))
            })?;

        let config = JwtConfig {
            jwt_secret,
            token_expiration_hours,
        };
        config.validate()?;
        info!("JWT configuration loaded successfully");
        Ok(config)
    }

    /// Create JwtConfig for testing
    pub fn from_test_env() -> Result<Self, ConfigError> {
        match env::var("JWT_SECRET") {
            Ok(secret) => {
                let config = JwtConfig {
                    jwt_secret: secret,
                    token_expiration_hours: 24,
                };
                config.validate()?;
                Ok(config)
            }
            Err(_) => Err(ConfigError::EnvVarNotFound("JWT_SECRET".to_string())),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            error!("JWT secret is empty");
            return Err(ConfigError::ValidationError(
                "JWT secret cannot be empty".to_string(),
            ));
        }

        if self.jwt_secret.len() < 32 {
            error!("JWT secret is too short (minimum 32 characters required)");
            return Err(ConfigError::ValidationError(
                "JWT secret must be at least 32 characters long".to_string(),
            ));
        }

        if self.token_expiration_hours <= 0 {
            error!("JWT token expiration must be greater than 0");
            return Err(ConfigError::ValidationError(
                "JWT token expiration must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        JwtConfig {
            jwt_secret: "insecure-development-secret-change-me-now".to_string(),
            token_expiration_hours: 24,
        }
    }
}
