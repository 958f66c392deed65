/// Authentication utilities
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`credentials`]: registration and login flows over the user store
///
/// # Example
///
/// ```no_run
/// use tareas_shared::auth::credentials::{authenticate, register};
/// use tareas_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let id = register(&pool, "daniela", "1234").await?;
/// let user = authenticate(&pool, "daniela", "1234").await?;
/// assert_eq!(user.id, id);
/// # Ok(())
/// # }
/// ```

pub mod credentials;
pub mod password;
