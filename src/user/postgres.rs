//! Handle database requests.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::error::Result;
use crate::user::{NewUser, User, UserRepository};

const COLUMNS: &str = "id, name, email, birth_date";

/// PostgreSQL user repository.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: Pool<Postgres>,
}

impl PgUserRepository {
    /// Create a new [`PgUserRepository`].
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");

        Ok(sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");

        Ok(sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_all(&self, offset: u64, limit: u64) -> Result<Vec<User>> {
        let query = format!(
            "SELECT {COLUMNS} FROM users ORDER BY id LIMIT $1 OFFSET $2"
        );

        Ok(sqlx::query_as::<_, User>(&query)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .bind(i64::try_from(offset).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?)
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        Ok(sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn insert(&self, user: NewUser) -> Result<User> {
        let query = format!(
            "INSERT INTO users (name, email, birth_date) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );

        Ok(sqlx::query_as::<_, User>(&query)
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.birth_date)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, user: &User) -> Result<Option<User>> {
        let query = format!(
            "UPDATE users SET name = $2, birth_date = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );

        Ok(sqlx::query_as::<_, User>(&query)
            .bind(user.id)
            .bind(&user.name)
            .bind(user.birth_date)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}
