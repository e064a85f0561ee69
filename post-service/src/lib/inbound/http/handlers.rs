use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::account::errors::AccountError;
use crate::domain::post::errors::PostError;

pub mod create_post;
pub mod delete_post;
pub mod get_post;
pub mod home;
pub mod list_posts;
pub mod login;
pub mod sign_up;
pub mod update_post;

/// Handler-boundary error. Rendered as the bare message in a plain-text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, message).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidAccountId(_)
            | AccountError::InvalidEmail(_)
            | AccountError::EmptyPassword => ApiError::BadRequest(err.to_string()),
            AccountError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AccountError::Hashing(_) | AccountError::Token(_) | AccountError::Repository(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::InvalidPostId(_) | PostError::InvalidPage(_) => {
                ApiError::BadRequest(err.to_string())
            }
            PostError::NotFound(_) => ApiError::NotFound(err.to_string()),
            PostError::UnknownOwner(_) => ApiError::Unauthorized(err.to_string()),
            PostError::Repository(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}
