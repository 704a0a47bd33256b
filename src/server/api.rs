//! Demo API routes under `/api`

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

use super::AppState;

pub(super) fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/hello", get(hello_handler))
        .route("/method", any(method_handler))
        .route("/users/:id", get(user_handler))
}

/// Proxy the upstream user list as `{"users": [...]}`
async fn hello_handler(State(state): State<Arc<AppState>>) -> Response {
    let url = &state.blog.config.api.users_url;
    match fetch_users(&state.http, url).await {
        Ok(users) => Json(json!({ "users": users })).into_response(),
        Err(e) => {
            tracing::warn!("Failed to fetch users from {}: {}", url, e);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": format!("failed to fetch users: {}", e) })),
            )
                .into_response()
        }
    }
}

async fn fetch_users(client: &reqwest::Client, url: &str) -> reqwest::Result<Value> {
    client.get(url).send().await?.error_for_status()?.json().await
}

/// Echo a fixed message per HTTP verb
async fn method_handler(method: Method, body: String) -> Json<Value> {
    tracing::debug!("{} /api/method body={:?}", method, body);

    let message = match method {
        Method::GET => "GET request",
        Method::POST => "POST request",
        Method::PUT => "PUT request",
        Method::PATCH => "PATCH request",
        _ => "Unsupported request",
    };

    Json(json!({ "message": message }))
}

/// Echo the path parameter
async fn user_handler(Path(id): Path<String>) -> Json<Value> {
    Json(json!({ "id": id }))
}
