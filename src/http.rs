//! HTTP surface: JSON handlers over an [`ItemStore`] and the router that
//! mounts them.

use crate::backend::ItemStore;
use crate::error::Error;
use crate::item::{Item, ItemInput};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Shared handler state: one store handle for every request.
#[derive(Clone)]
pub struct AppState {
    /// The backing store.
    pub store: Arc<dyn ItemStore>,
}

impl AppState {
    /// Wrap a store for use by the router.
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).fallback(method_not_allowed))
        .route(
            "/api/items",
            get(list_items)
                .post(create_item)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/items/",
            get(missing_id)
                .put(missing_id)
                .delete(missing_id)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/items/:id",
            get(get_item)
                .put(update_item)
                .delete(delete_item)
                .fallback(method_not_allowed),
        )
        .route("/api/db/save", post(save_db).fallback(method_not_allowed))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Error body returned by every handler: `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_payload() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid request payload")
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidId => Self::new(StatusCode::BAD_REQUEST, "Invalid item ID"),
            Error::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Item not found"),
            Error::AlreadyExists(id) => Self::new(
                StatusCode::CONFLICT,
                format!("Item with ID {id} already exists"),
            ),
            other => Self::new(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.message, "request failed");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.store.get_all())
}

async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    Ok(Json(state.store.get(&id)?))
}

async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let Json(input) = payload.map_err(|_| ApiError::bad_payload())?;
    let item = input.into_item();
    state.store.create(item.clone())?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> Result<Json<Item>, ApiError> {
    let existing = state.store.get(&id)?;
    let Json(input) = payload.map_err(|_| ApiError::bad_payload())?;
    let item = existing.revised(input.name, input.description);
    state.store.update(item.clone())?;
    Ok(Json(item))
}

async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.store.delete(&id)?;
    Ok(Json(json!({ "result": "success" })))
}

async fn method_not_allowed(method: Method) -> (StatusCode, String) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        format!("Method {method} not allowed"),
    )
}

async fn missing_id() -> ApiError {
    ApiError::from(Error::InvalidId)
}

async fn save_db(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let Some(path) = state.store.persist_path().map(|p| p.to_path_buf()) else {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "Persistence not enabled",
        ));
    };

    let store = Arc::clone(&state.store);
    let target = path.clone();
    tokio::task::spawn_blocking(move || store.save_snapshot(&target))
        .await
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(|e| {
            ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to save database: {e}"),
            )
        })?;

    info!(path = %path.display(), "database saved on request");
    Ok(Json(json!({
        "status": "success",
        "message": format!("Database saved to {}", path.display()),
    })))
}
