use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use bson::oid::ObjectId;
use std::sync::Arc;
use validator::Validate;

use crate::dto::article_dto::{CreateArticleRequest, UpdateArticleRequest};
use crate::dto::user_dto::MessageResponse;
use crate::service::article_service::{ArticleService, ArticleServiceImpl};
use crate::util::error::HandlerError;

fn parse_article_id(id: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(id).map_err(|_| HandlerError::bad_request("Invalid article id"))
}

// Public listing: active articles only, newest first.
pub async fn list_public_articles_handler(
    State(service): State<Arc<ArticleServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let articles = service.list_public_articles().await?;
    Ok(Json(articles))
}

// Public fetch: an inactive article presents as not found.
pub async fn get_public_article_handler(
    State(service): State<Arc<ArticleServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_article_id(&id)?;
    let article = service.get_public_article(id).await?;
    Ok(Json(article))
}

// Management listing: every article regardless of status.
pub async fn list_articles_handler(
    State(service): State<Arc<ArticleServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let articles = service.list_articles().await?;
    Ok(Json(articles))
}

pub async fn get_article_handler(
    State(service): State<Arc<ArticleServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_article_id(&id)?;
    let article = service.get_article(id).await?;
    Ok(Json(article))
}

pub async fn create_article_handler(
    State(service): State<Arc<ArticleServiceImpl>>,
    Json(payload): Json<CreateArticleRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let article = service.create_article(payload).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

pub async fn update_article_handler(
    State(service): State<Arc<ArticleServiceImpl>>,
    Path((id,)): Path<(String,)>,
    Json(payload): Json<UpdateArticleRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_article_id(&id)?;
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let article = service.update_article(id, payload).await?;
    Ok(Json(article))
}

pub async fn delete_article_handler(
    State(service): State<Arc<ArticleServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_article_id(&id)?;
    service.delete_article(id).await?;
    Ok(Json(MessageResponse {
        message: "Article deleted successfully".to_string(),
    }))
}
