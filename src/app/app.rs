use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::app_conf::AppConfig;
use crate::config::jwt_conf::JwtConfig;
use crate::config::mongo_conf::MongoConfig;
use crate::config::AdminUserConfig;
use crate::dto::user_dto::CreateUserRequest;
use crate::middlewares::auth_middleware::AuthState;
use crate::model::user::UserRole;
use crate::repository::article_repo::MongoArticleRepository;
use crate::repository::user_repo::MongoUserRepository;
use crate::router::article_router::article_router;
use crate::router::user_router::user_router;
use crate::service::article_service::ArticleServiceImpl;
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::ServiceError;
use crate::util::jwt::JwtTokenUtilsImpl;

pub struct App {
    config: AppConfig,
    router: Router,
    pub user_service: Arc<UserServiceImpl>,
    pub article_service: Arc<ArticleServiceImpl>,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();
        let jwt_config = JwtConfig::from_env().expect("JWT config error");
        let mongo_config = MongoConfig::from_env().expect("Mongo config error");

        let user_repo = Arc::new(
            MongoUserRepository::new(&mongo_config)
                .await
                .expect("User repo error"),
        );
        let article_repo = Arc::new(
            MongoArticleRepository::new(&mongo_config)
                .await
                .expect("Article repo error"),
        );

        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));
        let user_service = Arc::new(UserServiceImpl::new(user_repo, jwt_utils.clone()));
        let article_service = Arc::new(ArticleServiceImpl::new(article_repo));

        let auth_state = Arc::new(AuthState {
            jwt_utils: jwt_utils.clone(),
        });

        let router = Router::new()
            .merge(article_router(article_service.clone(), auth_state.clone()))
            .merge(user_router(user_service.clone(), auth_state))
            .route("/health", get(|| async { "OK" }))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        let app = App {
            config,
            router,
            user_service,
            article_service,
        };
        app.create_first_admin_user().await;
        app
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(self.config.host.parse().expect("Invalid host"), self.config.port);
        info!("Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind address");
        axum::serve(listener, self.router).await.expect("Failed to start server");
    }

    /// Seed the initial admin account when the ADMIN_* env block is present
    /// and no user with that email exists yet.
    async fn create_first_admin_user(&self) {
        let admin_conf = match AdminUserConfig::from_env() {
            Ok(c) => c,
            Err(e) => {
                warn!("Admin user config not loaded: {e}");
                return;
            }
        };

        let request = CreateUserRequest {
            first_name: Some(admin_conf.first_name),
            last_name: Some(admin_conf.last_name),
            email: Some(admin_conf.email.to_lowercase()),
            password: Some(admin_conf.password),
            username: None,
            role: Some(UserRole::Admin),
            is_active: Some(true),
            age: None,
            gender: None,
            contact_number: None,
            address: None,
        };
        match self.user_service.create_user(request).await {
            Ok(_) => info!("First admin user created."),
            Err(ServiceError::Conflict(_)) => {
                info!("Admin user already exists, skipping creation.")
            }
            Err(e) => error!("Failed to create admin user: {e}"),
        }
    }
}
