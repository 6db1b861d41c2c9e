//! Small widget API whose handlers fail through the exception factory

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use axum::routing::{get, post};
use axum::{Json, Router};
use http_exceptions::{ApiException, Exceptions, Payload};
use serde_json::{Value, json};

pub fn router(exceptions: Exceptions) -> Router {
    Router::new()
        .route("/widgets/{id}", get(get_widget).delete(delete_widget))
        .route("/widgets", post(create_widget))
        .route("/admin", get(admin))
        .with_state(exceptions)
}

fn payload(value: Value) -> Option<Payload> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

async fn get_widget(State(exceptions): State<Exceptions>, Path(id): Path<u32>) -> Result<Json<Value>, ApiException> {
    match id {
        1 => Ok(Json(json!({"id": 1, "name": "sprocket"}))),
        7 => Err(exceptions.gone(None, None)),
        _ => Err(exceptions.not_found(None, payload(json!({"id": id})))),
    }
}

async fn delete_widget(State(exceptions): State<Exceptions>, Path(id): Path<u32>) -> Result<(), ApiException> {
    Err(exceptions.failed_dependency(Some("inventory service unavailable"), payload(json!({"id": id}))))
}

async fn create_widget(
    State(exceptions): State<Exceptions>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<Value>, ApiException> {
    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if !is_json {
        return Err(exceptions.unsupported_media(None, None));
    }

    let Ok(widget) = serde_json::from_str::<Value>(&body) else {
        return Err(exceptions.bad_request(Some("body is not valid JSON"), None));
    };

    match widget.get("name").and_then(Value::as_str) {
        None => Err(exceptions.unprocessable_entity(None, payload(json!({"field": "name"})))),
        Some("sprocket") => Err(exceptions.conflict(Some("widget already exists"), None)),
        Some(name) => Ok(Json(json!({"id": 2, "name": name}))),
    }
}

async fn admin(State(exceptions): State<Exceptions>, headers: HeaderMap) -> Result<&'static str, ApiException> {
    match headers.get("x-role").and_then(|v| v.to_str().ok()) {
        None => Err(exceptions.unauthorized(None, None)),
        Some("admin") => Ok("welcome"),
        Some(_) => Err(exceptions.forbidden(None, payload(json!({"required_role": "admin"})))),
    }
}
