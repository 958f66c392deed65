/// Task row type
///
/// The `tareas` table is created with the rest of the schema so that a
/// user's tasks can reference `usuarios.id`, but no operation reads or
/// writes tasks yet. The row type pins down the column mapping.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tareas (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     usuario_id INTEGER,
///     titulo TEXT NOT NULL,
///     descripcion TEXT,
///     completada BOOLEAN DEFAULT FALSE,
///     fecha_creacion TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
///     FOREIGN KEY (usuario_id) REFERENCES usuarios (id)
/// );
/// ```

use crate::models::user::UserId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A task owned by a user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,

    /// Owning user (`usuario_id`)
    #[sqlx(rename = "usuario_id")]
    pub owner_id: Option<UserId>,

    #[sqlx(rename = "titulo")]
    pub title: String,

    #[sqlx(rename = "descripcion")]
    pub description: Option<String>,

    #[sqlx(rename = "completada")]
    pub completed: Option<bool>,

    /// Creation time (UTC, set by the database)
    #[sqlx(rename = "fecha_creacion")]
    pub created_at: Option<NaiveDateTime>,
}

/// Column list matching [`Task`]'s `FromRow` mapping
pub const TASK_COLUMNS: &str =
    "id, usuario_id, titulo, descripcion, completada, fecha_creacion";
