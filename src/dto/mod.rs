pub mod article_dto;
pub mod user_dto;
