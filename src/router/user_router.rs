use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::handler::user_handler::{
    create_user_handler, delete_user_handler, list_users_handler, login_handler,
    update_user_handler,
};
use crate::middlewares::auth_middleware::{require_admin, require_auth, AuthState};
use crate::service::user_service::UserServiceImpl;

pub fn user_router(service: Arc<UserServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    // Public routes: self-registration and login
    let public = Router::new()
        .route("/users", post(create_user_handler))
        .route("/users/login", post(login_handler));

    // Self-or-admin: the handler checks the caller against the path id
    let authenticated = Router::new()
        .route("/users/{id}", put(update_user_handler))
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            require_auth,
        ));

    // Admin-only account management
    let admin = Router::new()
        .route("/users", get(list_users_handler))
        .route("/users/{id}", delete(delete_user_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_admin));

    public
        .merge(authenticated)
        .merge(admin)
        .with_state(service)
}
