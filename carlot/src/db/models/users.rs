//! Database models for users.
//!
//! Users are read-only from this service's perspective: accounts are
//! provisioned out of band and there is no registration endpoint.

use sqlx::FromRow;

/// A user row, looked up by email during login.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    /// Argon2id hash in PHC string format
    pub password_hash: String,
}
