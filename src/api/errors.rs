use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::errors::{ErrorCategory, SondaError};

impl IntoResponse for SondaError {
    fn into_response(self) -> axum::response::Response {
        let classification = self.classify();
        let (status, message) = match classification.category {
            ErrorCategory::Input => (StatusCode::BAD_REQUEST, self.to_string()),
            // Internal detail stays opaque at the transport level
            ErrorCategory::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error".to_string(),
            ),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        (
            status,
            Json(json!({
                "error": message,
                "category": classification.category.as_str(),
            })),
        )
            .into_response()
    }
}
