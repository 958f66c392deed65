/// Registration and login flows over the credential store
///
/// Both flows touch the database exactly once. Argon2 work is moved onto
/// the blocking thread pool so a burst of logins does not stall the
/// runtime's worker threads.
///
/// Input shape (lengths, missing fields) is checked by the caller before
/// either flow runs.

use crate::auth::password::{self, PasswordError};
use crate::models::user::{CreateUser, User, UserError, UserId};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

/// Outcome of a failed registration or login
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Registration with a name that already exists
    #[error("User name already taken: {0}")]
    DuplicateName(String),

    /// Login with a name that was never registered
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// Login with the wrong password for an existing user
    #[error("Wrong password for user: {0}")]
    WrongPassword(String),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The blocking hash task panicked or was cancelled
    #[error("Password task failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),
}

impl From<UserError> for CredentialError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateName(name) => CredentialError::DuplicateName(name),
            UserError::Database(e) => CredentialError::Database(e),
        }
    }
}

/// Hashes `password` and stores a new user under `name`
///
/// # Errors
///
/// `CredentialError::DuplicateName` when the name is taken; the stored
/// record of the existing user is left as it was.
pub async fn register(
    pool: &SqlitePool,
    name: &str,
    password: &str,
) -> Result<UserId, CredentialError> {
    let password = password.to_owned();
    let password_hash =
        tokio::task::spawn_blocking(move || password::hash_password(&password)).await??;

    let id = User::insert(
        pool,
        CreateUser {
            name: name.to_owned(),
            password_hash,
        },
    )
    .await?;

    info!(user_id = %id, "User registered");
    Ok(id)
}

/// Looks up `name` and checks `password` against the stored hash
///
/// Never writes to the database, whatever the outcome.
///
/// # Errors
///
/// - `CredentialError::UnknownUser` if no user has this name
/// - `CredentialError::WrongPassword` if the password does not match, or
///   the stored hash is not in a supported format
pub async fn authenticate(
    pool: &SqlitePool,
    name: &str,
    password: &str,
) -> Result<User, CredentialError> {
    let user = User::find_by_name(pool, name)
        .await?
        .ok_or_else(|| CredentialError::UnknownUser(name.to_owned()))?;

    let password = password.to_owned();
    let stored_hash = user.password_hash.clone();
    let verified =
        tokio::task::spawn_blocking(move || password::verify_password(&password, &stored_hash))
            .await?;

    // Hashes in a foreign format (e.g. scrypt/pbkdf2 rows from an older
    // deployment) can never be matched, so they count as a wrong password.
    let valid = match verified {
        Ok(valid) => valid,
        Err(PasswordError::InvalidHash(reason)) => {
            warn!(user_id = %user.id, %reason, "Stored password hash is not a supported format");
            false
        }
        Err(e) => return Err(e.into()),
    };

    if !valid {
        debug!(user_id = %user.id, "Password mismatch");
        return Err(CredentialError::WrongPassword(user.name));
    }

    info!(user_id = %user.id, "User authenticated");
    Ok(user)
}
