//! HTTP layer - axum routes for the storefront and the order back office.
//!
//! Handlers only translate between JSON and [`crate::core`]; every error is rendered as
//! `{ "error": kind, "message": text }` with the status code the error maps to.

/// `POST /checkout`
pub mod checkout;
/// `GET /orders/:id`, `PATCH /orders/:id/status`
pub mod orders;

use crate::{config::AppConfig, errors::Error};
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared state available to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub database: DatabaseConnection,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Creates a new `AppState` from a connection and configuration.
    #[must_use]
    pub fn new(database: DatabaseConnection, config: AppConfig) -> Self {
        Self {
            database,
            config: Arc::new(config),
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error kind
    pub error: String,
    /// Localized, user-presentable message
    pub message: String,
}

/// Wrapper rendering [`Error`] as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::debug!("Request rejected: {}", self.0);
        }

        let body = ErrorResponse {
            error: self.0.kind().to_string(),
            message: self.0.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/checkout", post(checkout::create_checkout))
        .route("/orders/:id", get(orders::get_order))
        .route("/orders/:id/status", patch(orders::update_status))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Liveness check.
pub async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
pub(crate) mod test_support {
    #![allow(clippy::unwrap_used)]
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    /// Sends a JSON request through the router and decodes the JSON reply.
    pub async fn send_json<T: DeserializeOwned>(
        app: Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, T) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}
