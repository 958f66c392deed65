/// API route handlers
///
/// - `auth`: registration and login
/// - `health`: health check
/// - `pages`: static status page

pub mod auth;
pub mod health;
pub mod pages;

use crate::error::ApiError;
use axum::http::Uri;

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Ruta no encontrada: {}", uri.path()))
}
