use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::article::{Article, ArticleStatus};

/// Creation payload. Required-field presence is validated by the service so
/// missing fields surface as 400 with the combined field list message.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    pub article_name: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub author: Option<String>,
    pub image: Option<String>,
    pub status: Option<ArticleStatus>,
}

/// Partial update with a fixed set of typed fields; unknown keys rejected.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateArticleRequest {
    #[validate(length(min = 1))]
    pub article_name: Option<String>,
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub text: Option<String>,
    #[validate(length(min = 1))]
    pub author: Option<String>,
    pub image: Option<String>,
    pub status: Option<ArticleStatus>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    pub id: String,
    pub article_name: String,
    pub title: String,
    pub text: String,
    pub author: String,
    pub image: Option<String>,
    pub status: ArticleStatus,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        ArticleResponse {
            id: article.id.map(|id| id.to_hex()).unwrap_or_default(),
            article_name: article.article_name,
            title: article.title,
            text: article.text,
            author: article.author,
            image: article.image,
            status: article.status,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}
