mod common;

use std::sync::Arc;

use common::InMemoryArticleRepository;
use inkwell_backend::dto::article_dto::{CreateArticleRequest, UpdateArticleRequest};
use inkwell_backend::model::article::ArticleStatus;
use inkwell_backend::service::article_service::{ArticleService, ArticleServiceImpl};
use inkwell_backend::util::error::ServiceError;

fn new_service() -> (Arc<InMemoryArticleRepository>, ArticleServiceImpl) {
    let repo = Arc::new(InMemoryArticleRepository::new());
    let service = ArticleServiceImpl::new(repo.clone());
    (repo, service)
}

fn draft(name: &str) -> CreateArticleRequest {
    CreateArticleRequest {
        article_name: Some(name.to_string()),
        title: Some("A title".to_string()),
        text: Some("Body text".to_string()),
        author: Some("Grace".to_string()),
        image: None,
        status: None,
    }
}

fn empty_update() -> UpdateArticleRequest {
    UpdateArticleRequest {
        article_name: None,
        title: None,
        text: None,
        author: None,
        image: None,
        status: None,
    }
}

#[tokio::test]
async fn created_article_defaults_to_active_and_is_retrievable() {
    let (_repo, service) = new_service();
    let created = service.create_article(draft("launch")).await.unwrap();
    assert_eq!(created.status, ArticleStatus::Active);

    let id = bson::oid::ObjectId::parse_str(&created.id).unwrap();
    let fetched = service.get_article(id).await.unwrap();
    assert_eq!(fetched.article_name, "launch");
    assert!(fetched.created_at.is_some());
}

#[tokio::test]
async fn missing_required_fields_reject_creation() {
    let (repo, service) = new_service();
    let mut request = draft("launch");
    request.text = None;
    let err = service.create_article(request).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    // Whitespace-only counts as missing.
    let mut request = draft("launch");
    request.author = Some("   ".to_string());
    let err = service.create_article(request).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    assert_eq!(repo.count(), 0);
}

#[tokio::test]
async fn inactive_articles_are_hidden_from_public_reads() {
    let (_repo, service) = new_service();
    let mut request = draft("hidden");
    request.status = Some(ArticleStatus::Inactive);
    let hidden = service.create_article(request).await.unwrap();
    let visible = service.create_article(draft("visible")).await.unwrap();

    let public = service.list_public_articles().await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].article_name, "visible");

    let hidden_id = bson::oid::ObjectId::parse_str(&hidden.id).unwrap();
    let err = service.get_public_article(hidden_id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    // Management views still see both.
    let all = service.list_articles().await.unwrap();
    assert_eq!(all.len(), 2);
    let fetched = service.get_article(hidden_id).await.unwrap();
    assert_eq!(fetched.status, ArticleStatus::Inactive);

    let visible_id = bson::oid::ObjectId::parse_str(&visible.id).unwrap();
    service.get_public_article(visible_id).await.unwrap();
}

#[tokio::test]
async fn update_merges_only_provided_fields() {
    let (_repo, service) = new_service();
    let created = service.create_article(draft("launch")).await.unwrap();
    let id = bson::oid::ObjectId::parse_str(&created.id).unwrap();

    let mut update = empty_update();
    update.title = Some("Revised title".to_string());
    update.status = Some(ArticleStatus::Inactive);
    let updated = service.update_article(id, update).await.unwrap();

    assert_eq!(updated.title, "Revised title");
    assert_eq!(updated.status, ArticleStatus::Inactive);
    assert_eq!(updated.article_name, "launch");
    assert_eq!(updated.text, "Body text");
    assert_eq!(updated.author, "Grace");
}

#[tokio::test]
async fn update_rejects_emptying_a_required_field() {
    let (_repo, service) = new_service();
    let created = service.create_article(draft("launch")).await.unwrap();
    let id = bson::oid::ObjectId::parse_str(&created.id).unwrap();

    let mut update = empty_update();
    update.title = Some("  ".to_string());
    let err = service.update_article(id, update).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    let unchanged = service.get_article(id).await.unwrap();
    assert_eq!(unchanged.title, "A title");
}

#[tokio::test]
async fn update_unknown_article_is_not_found_and_mutates_nothing() {
    let (repo, service) = new_service();
    service.create_article(draft("launch")).await.unwrap();

    let mut update = empty_update();
    update.title = Some("stray".to_string());
    let err = service
        .update_article(bson::oid::ObjectId::new(), update)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let all = service.list_articles().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "A title");
    assert_eq!(repo.count(), 1);
}

#[tokio::test]
async fn delete_removes_the_article() {
    let (repo, service) = new_service();
    let created = service.create_article(draft("launch")).await.unwrap();
    let id = bson::oid::ObjectId::parse_str(&created.id).unwrap();

    service.delete_article(id).await.unwrap();
    assert_eq!(repo.count(), 0);

    let err = service.delete_article(id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn listings_return_newest_first() {
    let (_repo, service) = new_service();
    service.create_article(draft("first")).await.unwrap();
    service.create_article(draft("second")).await.unwrap();

    let all = service.list_articles().await.unwrap();
    assert_eq!(all[0].article_name, "second");
    assert_eq!(all[1].article_name, "first");
}
