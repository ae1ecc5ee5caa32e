use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::config::JwtConfig;
use crate::model::user::UserRole;

/// JWT token claims. The wire payload carries `{sub, email, type, iat, exp}`
/// so the role travels under the same key the clients already read.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User email
    pub email: String,
    /// User role (admin, editor, viewer)
    #[serde(rename = "type")]
    pub role: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    pub fn user_role(&self) -> Option<UserRole> {
        UserRole::parse(&self.role)
    }
}

/// Error types for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Failed to encode JWT token: {0}")]
    EncodingFailed(String),
    #[error("Failed to decode JWT token: {0}")]
    DecodingFailed(String),
    #[error("Token has expired")]
    TokenExpired,
    #[error("Invalid token format")]
    InvalidToken,
}

pub trait JwtTokenUtils {
    fn generate_token(&self, user_id: &str, email: &str, role: &str) -> Result<String, JwtError>;
    fn validate_token(&self, token: &str) -> Result<Claims, JwtError>;
    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError>;
    fn check_role_permission(&self, user_role: &str, allowed: &[UserRole]) -> bool;
}

#[derive(Debug, Clone)]
pub struct JwtTokenUtilsImpl {
    pub jwt_config: JwtConfig,
}

impl JwtTokenUtilsImpl {
    pub fn new(jwt_config: JwtConfig) -> Self {
        JwtTokenUtilsImpl { jwt_config }
    }
}

impl JwtTokenUtils for JwtTokenUtilsImpl {
    fn generate_token(&self, user_id: &str, email: &str, role: &str) -> Result<String, JwtError> {
        debug!("Generating token for user: {} with role: {}", user_id, role);

        let secret = self.jwt_config.jwt_secret.as_str();
        let now = Utc::now();
        let expiration = now + Duration::hours(self.jwt_config.token_expiration_hours);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let header = Header::new(Algorithm::HS256);
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        match encode(&header, &claims, &encoding_key) {
            Ok(token) => {
                debug!("Successfully generated token for user: {}", user_id);
                Ok(token)
            }
            Err(err) => {
                error!("Failed to encode JWT token: {}", err);
                Err(JwtError::EncodingFailed(err.to_string()))
            }
        }
    }

    fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        debug!("Validating JWT token");

        let secret = self.jwt_config.jwt_secret.as_str();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::new(Algorithm::HS256);

        match decode::<Claims>(token, &decoding_key, &validation) {
            Ok(token_data) => {
                let claims = token_data.claims;
                let now = Utc::now().timestamp();
                if claims.exp < now {
                    warn!("Token has expired for user: {}", claims.sub);
                    return Err(JwtError::TokenExpired);
                }
                debug!("Token validation successful for user: {}", claims.sub);
                Ok(claims)
            }
            Err(err) => {
                error!("Failed to decode JWT token: {}", err);
                Err(JwtError::DecodingFailed(err.to_string()))
            }
        }
    }

    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError> {
        if !auth_header.starts_with("Bearer ") {
            error!("Invalid authorization header format");
            return Err(JwtError::InvalidToken);
        }

        let token = auth_header.trim_start_matches("Bearer ").trim();
        if token.is_empty() {
            error!("Empty token in authorization header");
            return Err(JwtError::InvalidToken);
        }

        Ok(token.to_string())
    }

    fn check_role_permission(&self, user_role: &str, allowed: &[UserRole]) -> bool {
        match UserRole::parse(user_role) {
            Some(role) => allowed.contains(&role),
            None => false,
        }
    }
}
