use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::ability::errors::AbilityError;

impl IntoResponse for AbilityError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AbilityError::AccessDenied {
                action, type_name, ..
            } => (
                StatusCode::FORBIDDEN,
                json!({ "error": self.to_string(), "action": action, "type": type_name }),
            ),
            AbilityError::InvalidArgument(_) => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            _ => {
                tracing::error!(error = %self, "ability check failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
