/// User model and credential store operations
///
/// Users are only ever created through registration and looked up by name.
/// They are never updated or deleted.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE usuarios (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     usuario TEXT UNIQUE NOT NULL,
///     "contraseña_hash" TEXT NOT NULL,
///     fecha_registro TIMESTAMP DEFAULT CURRENT_TIMESTAMP
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tareas_shared::models::user::{User, CreateUser};
/// use tareas_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let id = User::insert(&pool, CreateUser {
///     name: "daniela".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// }).await?;
///
/// let found = User::find_by_name(&pool, "daniela").await?;
/// assert_eq!(found.map(|u| u.id), Some(id));
/// # Ok(())
/// # }
/// ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::fmt;

/// Row identifier of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Assigned by the database, increasing with every insert
    pub id: UserId,

    /// Unique login name
    pub name: String,

    /// Argon2id hash in PHC string format
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Registration time (UTC, set by the database)
    pub created_at: NaiveDateTime,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Login name
    pub name: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,
}

/// Errors raised by the credential store
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// Another user already holds this name
    #[error("User name already taken: {0}")]
    DuplicateName(String),

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl User {
    /// Inserts a new user and returns its id
    ///
    /// Uniqueness is enforced by the `UNIQUE` constraint on `usuario` within
    /// the single `INSERT`, so two concurrent registrations of the same name
    /// cannot both succeed. A rejected insert leaves the table unchanged.
    ///
    /// # Errors
    ///
    /// - `UserError::DuplicateName` if the name is taken
    /// - `UserError::Database` for any other failure
    pub async fn insert(pool: &SqlitePool, data: CreateUser) -> Result<UserId, UserError> {
        let result = sqlx::query_scalar::<_, UserId>(
            r#"
            INSERT INTO usuarios (usuario, "contraseña_hash")
            VALUES (?, ?)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(&data.password_hash)
        .fetch_one(pool)
        .await;

        match result {
            Ok(id) => Ok(id),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(UserError::DuplicateName(data.name))
            }
            Err(e) => Err(UserError::Database(e)),
        }
    }

    /// Finds a user by exact name
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id,
                   usuario AS name,
                   "contraseña_hash" AS password_hash,
                   fecha_registro AS created_at
            FROM usuarios
            WHERE usuario = ?
            "#,
        )
        .bind(name)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Counts registered users
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM usuarios")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
