use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use guildcard_core::error::CoreError;
use guildcard_util::validation::ValidationError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Guild not found")]
    GuildNotFound,
    #[error("Failed to fetch or process guild image")]
    ImageFetch,
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(_) | ApiError::GuildNotFound | ApiError::ImageFetch => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": self.to_string() })),
            )
                .into_response(),
            ApiError::Internal(err) => {
                tracing::error!("API internal error: {err:#}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::GuildNotFound => ApiError::GuildNotFound,
            CoreError::ImageFetch(reason) => {
                tracing::info!("card image unavailable: {reason}");
                ApiError::ImageFetch
            }
            CoreError::Upstream(msg) => ApiError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}
