//! In-memory repository doubles for service and router tests. They mimic the
//! storage-level behavior the services rely on: generated ids, write
//! timestamps, and unique-key rejections for email and username.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bson::oid::ObjectId;

use inkwell_backend::model::article::{Article, ArticleStatus};
use inkwell_backend::model::user::User;
use inkwell_backend::repository::article_repo::ArticleRepository;
use inkwell_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use inkwell_backend::repository::user_repo::UserRepository;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    miss_next_email_lookup: AtomicBool,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `find_by_email` return nothing, as if a concurrent
    /// writer landed between a caller's existence check and its insert. The
    /// unique-key rejection in `insert` still fires.
    pub fn miss_next_email_lookup(&self) {
        self.miss_next_email_lookup.store(true, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn stored_email(&self, username: &str) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.email.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::already_exists("Duplicate key: email"));
        }
        if users.iter().any(|u| u.username == user.username) {
            return Err(RepositoryError::already_exists("Duplicate key: username"));
        }
        user.id = Some(ObjectId::new());
        let now = chrono::Utc::now().to_rfc3339();
        user.created_at = Some(now.clone());
        user.updated_at = Some(now);
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: ObjectId, mut user: User) -> RepositoryResult<User> {
        let mut users = self.users.lock().unwrap();
        let position = users
            .iter()
            .position(|u| u.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found("No user found to update"))?;
        if users
            .iter()
            .any(|u| u.id != Some(id) && (u.email == user.email || u.username == user.username))
        {
            return Err(RepositoryError::already_exists("Duplicate key"));
        }
        user.id = Some(id);
        user.updated_at = Some(chrono::Utc::now().to_rfc3339());
        users[position] = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let mut users = self.users.lock().unwrap();
        let position = users
            .iter()
            .position(|u| u.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found("No user found to delete"))?;
        users.remove(position);
        Ok(())
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id.as_ref() == Some(id))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        if self.miss_next_email_lookup.swap(false, Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().rev().cloned().collect())
    }
}

#[derive(Default)]
pub struct InMemoryArticleRepository {
    articles: Mutex<Vec<Article>>,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.articles.lock().unwrap().len()
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn insert(&self, mut article: Article) -> RepositoryResult<Article> {
        let mut articles = self.articles.lock().unwrap();
        article.id = Some(ObjectId::new());
        let now = chrono::Utc::now().to_rfc3339();
        article.created_at = Some(now.clone());
        article.updated_at = Some(now);
        articles.push(article.clone());
        Ok(article)
    }

    async fn update(&self, id: ObjectId, mut article: Article) -> RepositoryResult<Article> {
        let mut articles = self.articles.lock().unwrap();
        let position = articles
            .iter()
            .position(|a| a.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found("No article found to update"))?;
        article.id = Some(id);
        article.updated_at = Some(chrono::Utc::now().to_rfc3339());
        articles[position] = article.clone();
        Ok(article)
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let mut articles = self.articles.lock().unwrap();
        let position = articles
            .iter()
            .position(|a| a.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found("No article found to delete"))?;
        articles.remove(position);
        Ok(())
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Article>> {
        Ok(self
            .articles
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id.as_ref() == Some(id))
            .cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Article>> {
        let articles = self.articles.lock().unwrap();
        Ok(articles.iter().rev().cloned().collect())
    }

    async fn find_active_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Article>> {
        Ok(self
            .articles
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id.as_ref() == Some(id) && a.status == ArticleStatus::Active)
            .cloned())
    }

    async fn find_active(&self) -> RepositoryResult<Vec<Article>> {
        let articles = self.articles.lock().unwrap();
        Ok(articles
            .iter()
            .rev()
            .filter(|a| a.status == ArticleStatus::Active)
            .cloned()
            .collect())
    }
}
