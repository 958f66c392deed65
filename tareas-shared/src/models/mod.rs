/// Database models
///
/// - `user`: registered users and the credential store operations
/// - `task`: task rows (schema only, no operations)

pub mod task;
pub mod user;
