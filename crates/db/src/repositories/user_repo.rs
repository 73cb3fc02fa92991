//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::User;

const COLUMNS: &str = "id, email, full_name, password_hash, created_at, updated_at";

/// Provides account lookup and creation.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with an already-hashed password.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        full_name: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, full_name, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(full_name)
            .bind(password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by email (login path).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
