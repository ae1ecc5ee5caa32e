use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::user::{User, UserRole};

/// Registration payload. Required-field presence is checked by the service so
/// a missing field reports as 400 rather than a deserialization error.
/// Unknown keys are tolerated here (clients send extra UI state); they are
/// never persisted because the service copies fields explicitly.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub username: Option<String>,
    #[serde(rename = "type")]
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
}

/// Partial update with a fixed set of typed fields. Unrecognized keys are
/// rejected outright instead of being merged into the document.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 64))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub username: Option<String>,
    #[serde(rename = "type")]
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Full user record with the password excluded. The only user shape any
/// read or write operation ever returns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    #[serde(rename = "type")]
    pub role: UserRole,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            username: user.username,
            role: user.role,
            is_active: user.is_active,
            age: user.age,
            gender: user.gender,
            contact_number: user.contact_number,
            address: user.address,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Public projection returned on successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "type")]
    pub role: UserRole,
    pub is_active: bool,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        AuthenticatedUser {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
            is_active: user.is_active,
        }
    }
}

/// Outcome of a successful login at the service level.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub token: String,
    pub user: AuthenticatedUser,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: AuthenticatedUser,
}

#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
