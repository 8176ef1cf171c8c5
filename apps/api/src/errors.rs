use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::credentials::CredentialError;
use crate::llm_client::LlmError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every error renders as `{"error": "<message>"}`; no codes reach the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// A screen action failed. `description` is the localized text shown to
    /// the user; the status comes from `source`.
    #[error("{description}: {source}")]
    Action {
        description: &'static str,
        source: Box<AppError>,
    },
}

impl AppError {
    /// Wraps any error into a screen-level failure with a localized description.
    pub fn action<E: Into<AppError>>(description: &'static str) -> impl FnOnce(E) -> AppError {
        move |e| AppError::Action {
            description,
            source: Box::new(e.into()),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Llm(LlmError::QuotaExceeded) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Llm(LlmError::MissingApiKey) => StatusCode::BAD_REQUEST,
            AppError::Llm(_) | AppError::Store(_) => StatusCode::BAD_GATEWAY,
            AppError::Credential(CredentialError::Empty | CredentialError::BadPrefix) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Credential(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Action { source, .. } => source.status(),
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::UnprocessableEntity(msg) => msg.clone(),
            AppError::Llm(e) => e.to_string(),
            AppError::Store(e) => e.to_string(),
            AppError::Credential(e @ (CredentialError::Empty | CredentialError::BadPrefix)) => {
                e.to_string()
            }
            AppError::Credential(_) => "An internal server error occurred".to_string(),
            AppError::Action { description, source } => match source.as_ref() {
                // Quota exhaustion is worth telling the user about verbatim.
                AppError::Llm(LlmError::QuotaExceeded) => source.message(),
                AppError::Validation(_) | AppError::UnprocessableEntity(_) => source.message(),
                _ => description.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::warn!("{self}");
        }

        let body = Json(json!({ "error": self.message() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_maps_to_429_with_quota_message() {
        let err = AppError::from(LlmError::QuotaExceeded);
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(err.message().contains("QUOTA EXCEEDED"));
    }

    #[test]
    fn test_action_hides_store_detail_behind_description() {
        let err = AppError::action::<StoreError>("Не вдалося завантажити кандидатів")(StoreError::Api {
            status: 401,
            body: "secret detail".to_string(),
        });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.message(), "Не вдалося завантажити кандидатів");
    }

    #[test]
    fn test_action_keeps_quota_message() {
        let err = AppError::action::<LlmError>("Не вдалося виконати аналіз")(LlmError::QuotaExceeded);
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(err.message().contains("QUOTA"));
    }

    #[test]
    fn test_bad_prefix_is_client_error() {
        let err = AppError::from(CredentialError::BadPrefix);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "API ключ має починатися з 'sk-'");
    }

    #[test]
    fn test_credential_io_failure_is_opaque_500() {
        let err = AppError::from(CredentialError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "/secret/path",
        )));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "An internal server error occurred");
    }
}
