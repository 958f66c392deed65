/// Health check endpoint
///
/// Reports whether the database answers, whether both tables exist, and how
/// many users are registered.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "tables": { "usuarios": true, "tareas": true },
///   "registered_users": 3,
///   "pool": { "active_connections": 1, "idle_connections": 0, "total_connections": 1 }
/// }
/// ```

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::collections::BTreeMap;
use tareas_shared::{
    db::{
        migrations::{table_exists, REQUIRED_TABLES},
        pool::{self, PoolStats},
    },
    models::user::User,
};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,

    /// Application version
    pub version: String,

    /// `connected` or `disconnected`
    pub database: String,

    /// Presence of each required table, keyed by table name
    pub tables: BTreeMap<String, bool>,

    /// Number of registered users, when it could be counted
    pub registered_users: Option<i64>,

    /// Connection pool usage
    pub pool: PoolStats,
}

/// Health check handler
///
/// Always answers 200; failures show up as a `degraded` status.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = pool::health_check(&state.db).await.is_ok();

    let (tables, registered_users) = if connected {
        inspect_schema(&state.db).await
    } else {
        let tables = REQUIRED_TABLES
            .iter()
            .map(|table| (table.to_string(), false))
            .collect();
        (tables, None)
    };

    let healthy = connected && tables.values().all(|present| *present);

    Json(HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
        tables,
        registered_users,
        pool: pool::get_pool_stats(&state.db),
    })
}

async fn inspect_schema(db: &SqlitePool) -> (BTreeMap<String, bool>, Option<i64>) {
    let mut tables = BTreeMap::new();
    for table in REQUIRED_TABLES {
        let present = table_exists(db, table).await.unwrap_or(false);
        tables.insert(table.to_string(), present);
    }

    let registered_users = if tables.get("usuarios").copied().unwrap_or(false) {
        match User::count(db).await {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::warn!("Failed to count users: {}", e);
                None
            }
        }
    } else {
        None
    };

    (tables, registered_users)
}
