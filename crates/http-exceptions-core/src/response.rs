use axum::Json;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::ApiException;

/// Render as the exception's status with the flat mapping as a JSON body
impl IntoResponse for ApiException {
    fn into_response(self) -> Response {
        let body = Value::Object(self.to_flat_mapping());
        (self.status_code(), Json(body)).into_response()
    }
}
