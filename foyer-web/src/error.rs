use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use foyer_core::error::FoyerError;

/// Core errors surfaced while answering a single request.
pub struct ApiError(pub FoyerError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            FoyerError::InvalidProxyTarget { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl From<FoyerError> for ApiError {
    fn from(err: FoyerError) -> Self {
        ApiError(err)
    }
}
