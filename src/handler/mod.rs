pub mod article_handler;
pub mod user_handler;
