use actix_web::{http::StatusCode, HttpResponse};
use application::error::AppError;
use application::query::QueryError;
use domain::engagement::{EngagementError, StoreError};
use domain::place::PlaceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match &err {
            AppError::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            AppError::AuthError(msg) => ApiError::Unauthorized(msg.clone()),
            AppError::AggregateNotFound(kind, id) => {
                ApiError::NotFound(format!("{} {}", kind, id))
            }
            AppError::PlaceError(PlaceError::Forbidden(msg)) => ApiError::Forbidden(msg.clone()),
            AppError::PlaceError(PlaceError::ValidationErr(msg)) => {
                ApiError::BadRequest(msg.clone())
            }
            AppError::PlaceError(PlaceError::NotFoundErr(msg)) => ApiError::NotFound(msg.clone()),
            AppError::CategoryError(domain::category::CategoryError::ValidationErr(msg)) => {
                ApiError::BadRequest(msg.clone())
            }
            AppError::ProfileError(domain::profile::ProfileError::ValidationErr(msg)) => {
                ApiError::BadRequest(msg.clone())
            }
            // 重复点赞/收藏撞唯一约束：409，前端据此回滚乐观更新
            AppError::EngagementError(EngagementError::RelationWrite(StoreError::Conflict(
                msg,
            ))) => ApiError::Conflict(msg.clone()),
            AppError::EngagementError(EngagementError::ValidationErr(msg)) => {
                ApiError::BadRequest(msg.clone())
            }
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::InvalidInput(msg) => ApiError::BadRequest(msg),
            QueryError::NotFound(msg) => ApiError::NotFound(msg),
            QueryError::ExecutionError(msg) | QueryError::DbError(msg) => ApiError::Internal(msg),
        }
    }
}

impl actix_web::error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}
