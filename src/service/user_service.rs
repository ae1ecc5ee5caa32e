use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, instrument, warn};
use validator::ValidateEmail;

use crate::dto::user_dto::{
    AuthenticatedUser, CreateUserRequest, LoginResult, UpdateUserRequest, UserResponse,
};
use crate::model::user::User;
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const ACCOUNT_DEACTIVATED: &str =
    "Your account has been deactivated. Please contact support for assistance.";

#[async_trait]
pub trait UserService: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserResponse>, ServiceError>;
    async fn create_user(&self, request: CreateUserRequest) -> Result<UserResponse, ServiceError>;
    async fn update_user(
        &self,
        id: ObjectId,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, ServiceError>;
    async fn delete_user(&self, id: ObjectId) -> Result<(), ServiceError>;
    async fn login(&self, email: String, password: String) -> Result<LoginResult, ServiceError>;
}

pub struct UserServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt_utils: Arc<JwtTokenUtilsImpl>) -> Self {
        Self {
            user_repo,
            jwt_utils,
        }
    }

    fn check_password_strength(password: &str) -> Result<(), ServiceError> {
        PasswordUtilsImpl::validate_password_strength(password)
            .map_err(|errors| ServiceError::InvalidInput(errors.join("; ")))
    }

    /// Derive a username from the email local part, appending an
    /// incrementing numeric suffix until it no longer collides.
    async fn derive_username(&self, email: &str) -> Result<String, ServiceError> {
        let base = email.split('@').next().unwrap_or(email).to_string();
        let mut candidate = base.clone();
        let mut counter: u32 = 0;
        while self.user_repo.find_by_username(&candidate).await?.is_some() {
            counter += 1;
            candidate = format!("{}{}", base, counter);
        }
        Ok(candidate)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[async_trait]
impl UserService for UserServiceImpl {
    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<UserResponse>, ServiceError> {
        let users = self.user_repo.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    #[instrument(skip(self, request))]
    async fn create_user(&self, request: CreateUserRequest) -> Result<UserResponse, ServiceError> {
        let first_name = non_empty(request.first_name);
        let last_name = non_empty(request.last_name);
        let email = non_empty(request.email);
        let password = non_empty(request.password);

        let (first_name, last_name, email, password) =
            match (first_name, last_name, email, password) {
                (Some(f), Some(l), Some(e), Some(p)) => (f, l, e, p),
                _ => {
                    return Err(ServiceError::InvalidInput(
                        "All fields are required".to_string(),
                    ))
                }
            };

        if !email.validate_email() {
            return Err(ServiceError::InvalidInput(
                "Please enter a valid email address".to_string(),
            ));
        }
        let email = email.to_lowercase();

        Self::check_password_strength(&password)?;

        // Fast-path pre-check; the unique index still backstops races.
        if self.user_repo.find_by_email(&email).await?.is_some() {
            warn!("Attempt to register an already used email");
            return Err(ServiceError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }

        let username = match non_empty(request.username) {
            Some(username) => {
                if self.user_repo.find_by_username(&username).await?.is_some() {
                    return Err(ServiceError::Conflict(
                        "This username is already taken".to_string(),
                    ));
                }
                username
            }
            None => self.derive_username(&email).await?,
        };

        let password_hash = PasswordUtilsImpl::hash_password(&password)
            .map_err(|e| ServiceError::InternalError(format!("Password hash error: {}", e)))?;

        let user = User {
            id: None,
            first_name,
            last_name,
            email,
            username,
            password_hash,
            role: request.role.unwrap_or_default(),
            is_active: request.is_active.unwrap_or(true),
            age: non_empty(request.age),
            gender: non_empty(request.gender),
            contact_number: non_empty(request.contact_number),
            address: non_empty(request.address),
            created_at: None,
            updated_at: None,
        };

        let inserted = self.user_repo.insert(user).await.map_err(|e| {
            error!("Failed to insert user: {}", e);
            ServiceError::from(e)
        })?;
        info!("User created");
        Ok(UserResponse::from(inserted))
    }

    #[instrument(skip(self, request), fields(id = %id))]
    async fn update_user(
        &self,
        id: ObjectId,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, ServiceError> {
        let mut user = self
            .user_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

        if let Some(email) = non_empty(request.email) {
            if !email.validate_email() {
                return Err(ServiceError::InvalidInput(
                    "Please enter a valid email address".to_string(),
                ));
            }
            let email = email.to_lowercase();
            if email != user.email {
                if self.user_repo.find_by_email(&email).await?.is_some() {
                    return Err(ServiceError::Conflict(
                        "An account with this email already exists".to_string(),
                    ));
                }
                user.email = email;
            }
        }

        if let Some(username) = non_empty(request.username) {
            if username != user.username {
                if self.user_repo.find_by_username(&username).await?.is_some() {
                    return Err(ServiceError::Conflict(
                        "This username is already taken".to_string(),
                    ));
                }
                user.username = username;
            }
        }

        if let Some(password) = non_empty(request.password) {
            Self::check_password_strength(&password)?;
            user.password_hash = PasswordUtilsImpl::hash_password(&password)
                .map_err(|e| ServiceError::InternalError(format!("Password hash error: {}", e)))?;
        }

        if let Some(first_name) = non_empty(request.first_name) {
            user.first_name = first_name;
        }
        if let Some(last_name) = non_empty(request.last_name) {
            user.last_name = last_name;
        }
        if let Some(role) = request.role {
            user.role = role;
        }
        if let Some(is_active) = request.is_active {
            user.is_active = is_active;
        }
        if request.age.is_some() {
            user.age = non_empty(request.age);
        }
        if request.gender.is_some() {
            user.gender = non_empty(request.gender);
        }
        if request.contact_number.is_some() {
            user.contact_number = non_empty(request.contact_number);
        }
        if request.address.is_some() {
            user.address = non_empty(request.address);
        }

        let updated = self.user_repo.update(id, user).await?;
        info!("User updated");
        Ok(UserResponse::from(updated))
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_user(&self, id: ObjectId) -> Result<(), ServiceError> {
        self.user_repo.delete(id).await?;
        info!("User deleted");
        Ok(())
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(&self, email: String, password: String) -> Result<LoginResult, ServiceError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ServiceError::InvalidInput(
                "Email and password are required".to_string(),
            ));
        }
        if !email.validate_email() {
            return Err(ServiceError::InvalidInput(
                "Please enter a valid email address".to_string(),
            ));
        }
        let email = email.to_lowercase();

        // Unknown email and wrong password share one message so callers
        // cannot probe for account existence.
        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !user.is_active {
            warn!("Login attempt on deactivated account");
            return Err(ServiceError::Forbidden(ACCOUNT_DEACTIVATED.to_string()));
        }

        let valid = PasswordUtilsImpl::verify_password(&password, &user.password_hash)
            .map_err(|e| ServiceError::InternalError(format!("Password verify error: {}", e)))?;
        if !valid {
            warn!("Invalid credentials");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = self
            .jwt_utils
            .generate_token(
                &user.id.map(|id| id.to_hex()).unwrap_or_default(),
                &user.email,
                user.role.as_str(),
            )
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))?;

        info!("User logged in");
        Ok(LoginResult {
            token,
            user: AuthenticatedUser::from(&user),
        })
    }
}
