use crate::config::mongo_conf::MongoConfig;
use crate::model::article::{Article, ArticleStatus};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::StreamExt;
use mongodb::options::FindOptions;
use tracing::{error, info};

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn insert(&self, article: Article) -> RepositoryResult<Article>;
    async fn update(&self, id: ObjectId, article: Article) -> RepositoryResult<Article>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Article>>;
    /// All articles, newest first by creation time.
    async fn find_all(&self) -> RepositoryResult<Vec<Article>>;
    /// Public variants: only `status = active` documents are visible.
    async fn find_active_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Article>>;
    async fn find_active(&self) -> RepositoryResult<Vec<Article>>;
}

pub struct MongoArticleRepository {
    collection: mongodb::Collection<Article>,
}

impl MongoArticleRepository {
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        use mongodb::{
            options::{ClientOptions, Credential, ResolverConfig},
            Client,
        };
        let mut client_options =
            ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare())
                .await?;
        client_options.app_name = Some("InkwellBackend".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout = Some(std::time::Duration::from_secs(
            config.connection_timeout_secs,
        ));
        if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
            client_options.credential = Some(
                Credential::builder()
                    .username(username.clone())
                    .password(password.clone())
                    .build(),
            );
        }
        let client = Client::with_options(client_options)?;
        let db = client.database(&config.database);
        let collection_name = config.articles_collection.as_deref().unwrap_or("articles");
        let collection = db.collection::<Article>(collection_name);
        Ok(MongoArticleRepository { collection })
    }

    async fn find_sorted(&self, filter: Option<Document>) -> RepositoryResult<Vec<Article>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .build();
        let mut cursor = self
            .collection
            .find(filter, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list articles: {}", e)))?;
        let mut articles = Vec::new();
        while let Some(article) = cursor.next().await {
            match article {
                Ok(a) => articles.push(a),
                Err(e) => {
                    error!("Failed to deserialize article: {}", e);
                    return Err(RepositoryError::serialization(format!(
                        "Failed to deserialize article: {}",
                        e
                    )));
                }
            }
        }
        Ok(articles)
    }
}

#[async_trait]
impl ArticleRepository for MongoArticleRepository {
    #[tracing::instrument(skip(self, article), fields(article_name = %article.article_name))]
    async fn insert(&self, mut article: Article) -> RepositoryResult<Article> {
        article.id = Some(ObjectId::new());
        let now = chrono::Utc::now().to_rfc3339();
        article.created_at = Some(now.clone());
        article.updated_at = Some(now);
        match self.collection.insert_one(article.clone(), None).await {
            Ok(_) => {
                info!("Article created");
                Ok(article)
            }
            Err(e) => {
                error!("Failed to create article: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self, article), fields(id = %id))]
    async fn update(&self, id: ObjectId, mut article: Article) -> RepositoryResult<Article> {
        article.updated_at = Some(chrono::Utc::now().to_rfc3339());
        let filter = doc! { "_id": id };
        let mut document = bson::to_document(&article).map_err(|e| {
            RepositoryError::serialization(format!("Failed to serialize article: {}", e))
        })?;
        document.remove("_id");
        let update = doc! { "$set": document };
        match self.collection.update_one(filter, update, None).await {
            Ok(update_result) if update_result.matched_count > 0 => Ok(article),
            Ok(_) => Err(RepositoryError::not_found(format!(
                "No article found to update for ID: {}",
                id
            ))),
            Err(e) => {
                error!("Failed to update article: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let filter = doc! { "_id": id };
        match self.collection.delete_one(filter, None).await {
            Ok(delete_result) if delete_result.deleted_count > 0 => {
                info!("Article deleted");
                Ok(())
            }
            Ok(_) => Err(RepositoryError::not_found(format!(
                "No article found to delete for ID: {}",
                id
            ))),
            Err(e) => {
                error!("Failed to delete article: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to delete article: {}",
                    e
                )))
            }
        }
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Article>> {
        let filter = doc! { "_id": id };
        let article = self.collection.find_one(filter, None).await.map_err(|e| {
            RepositoryError::database(format!("Failed to find article by id: {}", e))
        })?;
        Ok(article)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Article>> {
        self.find_sorted(None).await
    }

    async fn find_active_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Article>> {
        let filter = doc! { "_id": id, "status": ArticleStatus::Active.as_str() };
        let article = self.collection.find_one(filter, None).await.map_err(|e| {
            RepositoryError::database(format!("Failed to find article by id: {}", e))
        })?;
        Ok(article)
    }

    async fn find_active(&self) -> RepositoryResult<Vec<Article>> {
        self.find_sorted(Some(doc! { "status": ArticleStatus::Active.as_str() }))
            .await
    }
}
