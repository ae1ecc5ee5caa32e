use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{info, instrument};

use crate::dto::article_dto::{ArticleResponse, CreateArticleRequest, UpdateArticleRequest};
use crate::model::article::Article;
use crate::repository::article_repo::ArticleRepository;
use crate::util::error::ServiceError;

const MISSING_FIELDS: &str =
    "Please provide all required fields: articleName, title, text, author";

#[async_trait]
pub trait ArticleService: Send + Sync {
    /// Management views: every article regardless of status.
    async fn list_articles(&self) -> Result<Vec<ArticleResponse>, ServiceError>;
    async fn get_article(&self, id: ObjectId) -> Result<ArticleResponse, ServiceError>;
    /// Public views: active articles only; inactive presents as NotFound.
    async fn list_public_articles(&self) -> Result<Vec<ArticleResponse>, ServiceError>;
    async fn get_public_article(&self, id: ObjectId) -> Result<ArticleResponse, ServiceError>;
    async fn create_article(
        &self,
        request: CreateArticleRequest,
    ) -> Result<ArticleResponse, ServiceError>;
    async fn update_article(
        &self,
        id: ObjectId,
        request: UpdateArticleRequest,
    ) -> Result<ArticleResponse, ServiceError>;
    async fn delete_article(&self, id: ObjectId) -> Result<(), ServiceError>;
}

pub struct ArticleServiceImpl {
    pub article_repo: Arc<dyn ArticleRepository>,
}

impl ArticleServiceImpl {
    pub fn new(article_repo: Arc<dyn ArticleRepository>) -> Self {
        Self { article_repo }
    }
}

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[async_trait]
impl ArticleService for ArticleServiceImpl {
    #[instrument(skip(self))]
    async fn list_articles(&self) -> Result<Vec<ArticleResponse>, ServiceError> {
        let articles = self.article_repo.find_all().await?;
        Ok(articles.into_iter().map(ArticleResponse::from).collect())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_article(&self, id: ObjectId) -> Result<ArticleResponse, ServiceError> {
        let article = self
            .article_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Article not found".to_string()))?;
        Ok(ArticleResponse::from(article))
    }

    #[instrument(skip(self))]
    async fn list_public_articles(&self) -> Result<Vec<ArticleResponse>, ServiceError> {
        let articles = self.article_repo.find_active().await?;
        Ok(articles.into_iter().map(ArticleResponse::from).collect())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_public_article(&self, id: ObjectId) -> Result<ArticleResponse, ServiceError> {
        let article = self
            .article_repo
            .find_active_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Article not found".to_string()))?;
        Ok(ArticleResponse::from(article))
    }

    #[instrument(skip(self, request))]
    async fn create_article(
        &self,
        request: CreateArticleRequest,
    ) -> Result<ArticleResponse, ServiceError> {
        let article_name = required(request.article_name);
        let title = required(request.title);
        let text = request.text.filter(|t| !t.trim().is_empty());
        let author = required(request.author);

        let (article_name, title, text, author) = match (article_name, title, text, author) {
            (Some(n), Some(t), Some(x), Some(a)) => (n, t, x, a),
            _ => return Err(ServiceError::InvalidInput(MISSING_FIELDS.to_string())),
        };

        let article = Article {
            id: None,
            article_name,
            title,
            text,
            author,
            image: required(request.image),
            status: request.status.unwrap_or_default(),
            created_at: None,
            updated_at: None,
        };

        let created = self.article_repo.insert(article).await?;
        info!("Article created");
        Ok(ArticleResponse::from(created))
    }

    #[instrument(skip(self, request), fields(id = %id))]
    async fn update_article(
        &self,
        id: ObjectId,
        request: UpdateArticleRequest,
    ) -> Result<ArticleResponse, ServiceError> {
        let mut article = self
            .article_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Article not found".to_string()))?;

        // Required fields stay non-empty across every successful write.
        if let Some(value) = request.article_name {
            article.article_name = required(Some(value))
                .ok_or_else(|| ServiceError::InvalidInput("articleName cannot be empty".into()))?;
        }
        if let Some(value) = request.title {
            article.title = required(Some(value))
                .ok_or_else(|| ServiceError::InvalidInput("title cannot be empty".into()))?;
        }
        if let Some(value) = request.text {
            if value.trim().is_empty() {
                return Err(ServiceError::InvalidInput("text cannot be empty".into()));
            }
            article.text = value;
        }
        if let Some(value) = request.author {
            article.author = required(Some(value))
                .ok_or_else(|| ServiceError::InvalidInput("author cannot be empty".into()))?;
        }
        if request.image.is_some() {
            article.image = required(request.image);
        }
        if let Some(status) = request.status {
            article.status = status;
        }

        let updated = self.article_repo.update(id, article).await?;
        info!("Article updated");
        Ok(ArticleResponse::from(updated))
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_article(&self, id: ObjectId) -> Result<(), ServiceError> {
        self.article_repo.delete(id).await?;
        info!("Article deleted");
        Ok(())
    }
}
