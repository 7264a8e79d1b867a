use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::normalizer::MalformedResponseError;
use crate::generation::validation::ValidationError;
use crate::llm_client::ProviderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every message is safe to show to the end user.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    MalformedResponse(#[from] MalformedResponseError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(e) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Provider(e) => {
                tracing::error!("Provider error: {e}");
                let (status, code) = match e {
                    ProviderError::AuthFailure { .. } => {
                        (StatusCode::BAD_GATEWAY, "PROVIDER_AUTH_FAILURE")
                    }
                    ProviderError::RateLimited { .. } => {
                        (StatusCode::SERVICE_UNAVAILABLE, "PROVIDER_RATE_LIMITED")
                    }
                    ProviderError::Timeout { .. } => {
                        (StatusCode::GATEWAY_TIMEOUT, "PROVIDER_TIMEOUT")
                    }
                    ProviderError::Unavailable { .. } => {
                        (StatusCode::BAD_GATEWAY, "PROVIDER_UNAVAILABLE")
                    }
                };
                (status, code, e.to_string())
            }
            AppError::MalformedResponse(e) => {
                if let MalformedResponseError::ParseFailure { snippet, .. } = e {
                    tracing::error!("Malformed provider response: {e} (text: {snippet:?})");
                } else {
                    tracing::error!("Malformed provider response: {e}");
                }
                (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE", e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
