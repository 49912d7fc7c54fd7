use thiserror::Error;

pub mod dao;
pub mod dto;
pub mod get_engagement_status;
pub mod get_favorites;
pub mod get_homepage_stats;
pub mod get_nearby_users;
pub mod search;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Execution error: {0}")]
    ExecutionError(String),
    #[error("Database error: {0}")]
    DbError(String),
}
