use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension,
};
use bson::oid::ObjectId;
use std::sync::Arc;
use validator::Validate;

use crate::dto::user_dto::{
    CreateUserRequest, LoginRequest, LoginResponse, MessageResponse, UpdateUserRequest,
    UserEnvelope,
};
use crate::model::user::UserRole;
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::HandlerError;
use crate::util::jwt::Claims;

fn parse_user_id(id: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(id).map_err(|_| HandlerError::bad_request("Invalid user id"))
}

// List Users (admin only)
pub async fn list_users_handler(
    State(service): State<Arc<UserServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

// Create User (public self-registration)
pub async fn create_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Json(mut payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    // The endpoint is unauthenticated, so caller-supplied role and activation
    // state are never honored; accounts start as active editors.
    payload.role = None;
    payload.is_active = None;
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let user = service.create_user(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope {
            message: "User created successfully".to_string(),
            user,
        }),
    ))
}

// Update User (self or admin)
pub async fn update_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Extension(claims): Extension<Claims>,
    Path((id,)): Path<(String,)>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let object_id = parse_user_id(&id)?;
    let is_self = claims.sub == object_id.to_hex();
    let is_admin = claims.user_role() == Some(UserRole::Admin);
    if !is_self && !is_admin {
        return Err(HandlerError::forbidden(
            "You may only update your own account",
        ));
    }
    if !is_admin && (payload.role.is_some() || payload.is_active.is_some()) {
        return Err(HandlerError::forbidden(
            "Only administrators can change roles or account status",
        ));
    }
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let user = service.update_user(object_id, payload).await?;
    Ok(Json(UserEnvelope {
        message: "User updated successfully".to_string(),
        user,
    }))
}

// Delete User (admin only)
pub async fn delete_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let object_id = parse_user_id(&id)?;
    service.delete_user(object_id).await?;
    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}

// Login
pub async fn login_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();
    let result = service.login(email, password).await?;
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token: result.token,
        user: result.user,
    }))
}
