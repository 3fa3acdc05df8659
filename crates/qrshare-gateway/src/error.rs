use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use qrshare_core::PublishError;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

/// Failures of a request, rendered as a status code and a generic message.
///
/// The underlying detail is logged and never sent to the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error("malformed request body: {0}")]
    BadRequest(#[from] JsonRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(rejection) => {
                tracing::debug!(detail = %rejection.body_text(), "rejected request body");
                (StatusCode::BAD_REQUEST, "invalid input")
            }
            AppError::Publish(PublishError::InvalidInput(detail)) => {
                tracing::debug!(detail = %detail, "rejected publish request");
                (StatusCode::BAD_REQUEST, "invalid input")
            }
            AppError::Publish(PublishError::NotFound(_)) => (StatusCode::NOT_FOUND, "not found"),
            AppError::Publish(PublishError::StoreUnavailable(detail)) => {
                tracing::error!(detail = %detail, "store unavailable");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage unavailable")
            }
        };

        let body = ErrorResponse {
            error: message.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: PublishError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn maps_publish_errors_to_status_codes() {
        assert_eq!(
            status_of(PublishError::InvalidInput("empty".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(PublishError::NotFound("rabc".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(PublishError::StoreUnavailable("connection refused".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
