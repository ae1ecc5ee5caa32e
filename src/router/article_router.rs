use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::handler::article_handler::{
    create_article_handler, delete_article_handler, get_article_handler,
    get_public_article_handler, list_articles_handler, list_public_articles_handler,
    update_article_handler,
};
use crate::middlewares::auth_middleware::{require_auth, require_staff, AuthState};
use crate::service::article_service::ArticleServiceImpl;

pub fn article_router(service: Arc<ArticleServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    // Public reader routes: active articles only
    let public = Router::new()
        .route("/articles", get(list_public_articles_handler))
        .route("/articles/{id}", get(get_public_article_handler));

    // Management reads: any authenticated dashboard user sees all statuses
    let manage = Router::new()
        .route("/manage/articles", get(list_articles_handler))
        .route("/manage/articles/{id}", get(get_article_handler))
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            require_auth,
        ));

    // Content mutations: editors and admins
    let staff = Router::new()
        .route("/articles", post(create_article_handler))
        .route("/articles/{id}", put(update_article_handler))
        .route("/articles/{id}", delete(delete_article_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_staff));

    public.merge(manage).merge(staff).with_state(service)
}
