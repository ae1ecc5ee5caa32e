use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Visibility flag for an article. Inactive articles stay fully readable and
/// writable through the management API but are hidden from the public paths.
/// This is not a soft delete; delete removes the document for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Active,
    Inactive,
}

impl Default for ArticleStatus {
    fn default() -> Self {
        ArticleStatus::Active
    }
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Active => "active",
            ArticleStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub article_name: String,
    pub title: String,
    pub text: String,
    pub author: String,
    pub image: Option<String>,
    #[serde(default)]
    pub status: ArticleStatus,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
