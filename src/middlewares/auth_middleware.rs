use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use std::sync::Arc;

use crate::model::user::UserRole;
use crate::util::error::HandlerError;
use crate::util::jwt::{Claims, JwtTokenUtils, JwtTokenUtilsImpl};

pub struct AuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

fn authenticate(state: &AuthState, req: &Request<Body>) -> Result<Claims, HandlerError> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| HandlerError::unauthorized("Missing authorization header"))?;

    let token = state
        .jwt_utils
        .extract_token_from_header(auth_header)
        .map_err(|_| HandlerError::unauthorized("Invalid authorization header"))?;

    state
        .jwt_utils
        .validate_token(&token)
        .map_err(|_| HandlerError::unauthorized("Invalid or expired token"))
}

fn check_roles(
    state: &AuthState,
    claims: &Claims,
    allowed: &[UserRole],
) -> Result<(), HandlerError> {
    if state.jwt_utils.check_role_permission(&claims.role, allowed) {
        Ok(())
    } else {
        Err(HandlerError::forbidden(
            "You do not have permission to perform this action",
        ))
    }
}

/// Any valid bearer token. Claims are attached to the request extensions for
/// handlers that need the caller's identity.
pub async fn require_auth(
    State(state): State<Arc<AuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let claims = authenticate(&state, &req)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Content-mutation gate: editors and admins only.
pub async fn require_staff(
    State(state): State<Arc<AuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let claims = authenticate(&state, &req)?;
    check_roles(&state, &claims, &[UserRole::Editor, UserRole::Admin])?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Account-management gate: admins only.
pub async fn require_admin(
    State(state): State<Arc<AuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let claims = authenticate(&state, &req)?;
    check_roles(&state, &claims, &[UserRole::Admin])?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
