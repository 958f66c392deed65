/// Static informational page
///
/// Served for `GET /tareas` and `GET /`. The document is compiled into the
/// binary and never changes at runtime.

use axum::response::Html;

const STATUS_PAGE: &str = include_str!("../../templates/tareas.html");

/// Returns the fixed status page
pub async fn status_page() -> Html<&'static str> {
    Html(STATUS_PAGE)
}
