use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use stockboard_core::ValidationError;
use thiserror::Error;

/// Request-level errors returned by dashboard routes.
#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),
}

impl WebError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.to_string() });
        (self.status(), axum::Json(body)).into_response()
    }
}

/// Failures that stop the server before or while serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_maps_to_bad_request() {
        let error = WebError::from(ValidationError::InvalidDate {
            value: String::from("2023-13-40"),
        });
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error.to_string(),
            "date must be formatted as YYYY-MM-DD: '2023-13-40'"
        );
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
