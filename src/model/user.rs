use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Dashboard role attached to every account. Governs which management
/// screens and endpoints the account may reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Editor,
    Viewer,
}

impl Default for UserRole {
    // Self-registered accounts get editor access. See design notes.
    fn default() -> Self {
        UserRole::Editor
    }
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Editor => "editor",
            UserRole::Viewer => "viewer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "editor" => Some(UserRole::Editor),
            "viewer" => Some(UserRole::Viewer),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored user document. `password_hash` holds the argon2 hash and is only
/// ever serialized towards the database, never into an API response; all
/// responses go through `dto::user_dto::UserResponse`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    #[serde(rename = "password")]
    pub password_hash: String,
    #[serde(rename = "type", default)]
    pub role: UserRole,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

fn default_is_active() -> bool {
    true
}
