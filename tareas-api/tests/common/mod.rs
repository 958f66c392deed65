/// Common test utilities for integration tests
///
/// Every `TestContext` owns a fresh, migrated in-memory database and a
/// router built on top of it, so tests never share state.

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use serde_json::Value;
use sqlx::SqlitePool;
use tareas_api::app::{build_router, AppState};
use tareas_api::config::Config;
use tareas_shared::db::migrations::run_migrations;
use tareas_shared::db::pool::{create_pool, DatabaseConfig};
use tower::ServiceExt;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context with a fresh database
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_config(Config::default()).await
    }

    /// Creates a test context with a custom configuration
    pub async fn with_config(config: Config) -> anyhow::Result<Self> {
        let db = create_pool(DatabaseConfig::in_memory()).await?;
        run_migrations(&db).await?;

        let app = build_router(AppState::new(db.clone(), config));

        Ok(TestContext { db, app })
    }

    /// Sends a request through the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// POSTs a raw JSON body and returns status and parsed body
    pub async fn post_json(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = self.send(request).await;
        let status = response.status();
        (status, body_json(response).await)
    }

    /// POSTs `{"usuario": name, "contraseña": password}`
    pub async fn post_credentials(&self, uri: &str, name: &str, password: &str) -> (StatusCode, Value) {
        let body = serde_json::json!({ "usuario": name, "contraseña": password });
        self.post_json(uri, &body.to_string()).await
    }

    /// Sends a GET request
    pub async fn get(&self, uri: &str) -> Response<Body> {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }
}

/// Reads the whole body as a string
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Reads the whole body as JSON
pub async fn body_json(response: Response<Body>) -> Value {
    let body = body_string(response).await;
    serde_json::from_str(&body).unwrap_or_else(|e| panic!("Invalid JSON body {:?}: {}", body, e))
}
