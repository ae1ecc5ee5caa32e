pub mod article_router;
pub mod user_router;
