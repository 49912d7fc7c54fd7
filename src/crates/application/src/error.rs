use domain::category::CategoryError;
use domain::engagement::EngagementError;
use domain::place::PlaceError;
use domain::profile::ProfileError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Engagement error: {0}")]
    EngagementError(#[from] EngagementError),
    #[error("Place error: {0}")]
    PlaceError(#[from] PlaceError),
    #[error("Profile error: {0}")]
    ProfileError(#[from] ProfileError),
    #[error("Category error: {0}")]
    CategoryError(#[from] CategoryError),
    #[error("Aggregate not found: {0}: {1}")]
    AggregateNotFound(String, String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Unknown error: {0}")]
    UnknownError(String),
}
