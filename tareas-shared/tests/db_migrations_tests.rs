/// Integration tests for schema initialization
///
/// Each test runs against its own in-memory SQLite database.

use tareas_shared::db::migrations::{get_migration_status, run_migrations, table_exists};
use tareas_shared::db::pool::{close_pool, create_pool, DatabaseConfig};
use tareas_shared::models::task::{Task, TASK_COLUMNS};
use tareas_shared::models::user::User;

async fn fresh_pool() -> sqlx::SqlitePool {
    create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool")
}

#[tokio::test]
async fn test_run_migrations_creates_tables() {
    let pool = fresh_pool().await;

    assert!(!table_exists(&pool, "usuarios").await.unwrap());
    assert!(!table_exists(&pool, "tareas").await.unwrap());

    run_migrations(&pool).await.expect("Migrations failed");

    assert!(table_exists(&pool, "usuarios").await.unwrap());
    assert!(table_exists(&pool, "tareas").await.unwrap());

    let status = get_migration_status(&pool).await.unwrap();
    assert_eq!(status.applied_migrations, 1);
    assert!(status.latest_version.is_some());
    assert!(status.is_up_to_date);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_status_before_migrations() {
    let pool = fresh_pool().await;

    let status = get_migration_status(&pool).await.unwrap();
    assert_eq!(status.applied_migrations, 0);
    assert!(status.latest_version.is_none());
    assert!(!status.is_up_to_date);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let pool = fresh_pool().await;

    run_migrations(&pool).await.expect("First run failed");
    run_migrations(&pool).await.expect("Second run failed");

    let status = get_migration_status(&pool).await.unwrap();
    assert_eq!(status.applied_migrations, 1);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_migrations_keep_data_in_untracked_tables() {
    let pool = fresh_pool().await;

    // A database created before migrations were tracked
    sqlx::query(
        r#"
        CREATE TABLE usuarios (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            usuario TEXT UNIQUE NOT NULL,
            "contraseña_hash" TEXT NOT NULL,
            fecha_registro TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query(r#"INSERT INTO usuarios (usuario, "contraseña_hash") VALUES ('daniela', 'h')"#)
        .execute(&pool)
        .await
        .unwrap();

    run_migrations(&pool).await.expect("Migrations failed");

    let user = User::find_by_name(&pool, "daniela").await.unwrap();
    assert_eq!(user.map(|u| u.password_hash), Some("h".to_string()));
    assert!(table_exists(&pool, "tareas").await.unwrap());

    close_pool(pool).await;
}

#[tokio::test]
async fn test_task_rows_reference_users() {
    let pool = fresh_pool().await;
    run_migrations(&pool).await.unwrap();

    sqlx::query(r#"INSERT INTO usuarios (usuario, "contraseña_hash") VALUES ('daniela', 'h')"#)
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO tareas (usuario_id, titulo) VALUES (1, 'Estudiar')")
        .execute(&pool)
        .await
        .unwrap();

    let task: Task = sqlx::query_as(&format!("SELECT {} FROM tareas", TASK_COLUMNS))
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(task.owner_id.map(|id| id.0), Some(1));
    assert_eq!(task.title, "Estudiar");
    assert!(task.description.is_none());
    assert_eq!(task.completed, Some(false));
    assert!(task.created_at.is_some());

    // Foreign keys are enforced
    let orphan = sqlx::query("INSERT INTO tareas (usuario_id, titulo) VALUES (99, 'Huérfana')")
        .execute(&pool)
        .await;
    assert!(orphan.is_err());

    close_pool(pool).await;
}
