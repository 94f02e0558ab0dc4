//! Credential lookup for login.

use crate::db::{errors::Result, models::users::User};
use sqlx::PgPool;
use tracing::instrument;

/// Lookup capability for stored credentials.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// PostgreSQL-backed user store.
#[derive(Clone)]
pub struct Users {
    pool: PgPool,
}

impl Users {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for Users {
    #[instrument(skip_all, err)]
    async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, email, password_hash FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }
}
