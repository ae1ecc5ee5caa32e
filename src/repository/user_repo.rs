use crate::config::mongo_conf::MongoConfig;
use crate::model::user::User;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::IndexModel;
use tracing::{error, info};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: User) -> RepositoryResult<User>;
    async fn update(&self, id: ObjectId, user: User) -> RepositoryResult<User>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
    async fn find_all(&self) -> RepositoryResult<Vec<User>>;
}

pub struct MongoUserRepository {
    collection: mongodb::Collection<User>,
}

impl MongoUserRepository {
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
        let collection_name = config.users_collection.as_deref().unwrap_or("users");
        let collection = db.collection::<User>(collection_name);

        let repo = MongoUserRepository { collection };
        repo.ensure_indexes().await?;
        Ok(repo)
    }

    // Unique indexes are the source of truth for email/username uniqueness;
    // the service-level pre-checks only exist for friendlier error messages.
    async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(email_index, None).await?;
        self.collection.create_index(username_index, None).await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[tracing::instrument(skip(self, user), fields(email = %user.email))]
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        user.id = Some(ObjectId::new());
        let now = chrono::Utc::now().to_rfc3339();
        user.created_at = Some(now.clone());
        user.updated_at = Some(now);
        match self.collection.insert_one(user.clone(), None).await {
            Ok(_) => {
                info!("User inserted");
                Ok(user)
            }
            Err(e) => {
                error!("Failed to insert user: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self, user), fields(id = %id))]
    async fn update(&self, id: ObjectId, mut user: User) -> RepositoryResult<User> {
        user.updated_at = Some(chrono::Utc::now().to_rfc3339());
        let filter = doc! { "_id": id };
        let mut document = bson::to_document(&user)
            .map_err(|e| RepositoryError::serialization(format!("Failed to serialize user: {}", e)))?;
        document.remove("_id");
        let update = doc! { "$set": document };
        match self.collection.update_one(filter, update, None).await {
            Ok(update_result) if update_result.matched_count > 0 => Ok(user),
            Ok(_) => Err(RepositoryError::not_found(format!(
                "No user found to update for ID: {}",
                id
            ))),
            Err(e) => {
                error!("Failed to update user: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let filter = doc! { "_id": id };
        match self.collection.delete_one(filter, None).await {
            Ok(delete_result) if delete_result.deleted_count > 0 => {
                info!("User deleted");
                Ok(())
            }
            Ok(_) => Err(RepositoryError::not_found(format!(
                "No user found to delete for ID: {}",
                id
            ))),
            Err(e) => {
                error!("Failed to delete user: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to delete user: {}",
                    e
                )))
            }
        }
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>> {
        let filter = doc! { "_id": id };
        let user = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find user by id: {}", e)))?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let filter = doc! { "email": email };
        let user = self.collection.find_one(filter, None).await.map_err(|e| {
            RepositoryError::database(format!("Failed to find user by email: {}", e))
        })?;
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        let filter = doc! { "username": username };
        let user = self.collection.find_one(filter, None).await.map_err(|e| {
            RepositoryError::database(format!("Failed to find user by username: {}", e))
        })?;
        Ok(user)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<User>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .build();
        let mut cursor = self
            .collection
            .find(None, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list users: {}", e)))?;
        let mut users = Vec::new();
        while let Some(user) = cursor.next().await {
            match user {
                Ok(u) => users.push(u),
                Err(e) => {
                    error!("Failed to deserialize user: {}", e);
                    return Err(RepositoryError::serialization(format!(
                        "Failed to deserialize user: {}",
                        e
                    )));
                }
            }
        }
        Ok(users)
    }
}
