//! Persistence port for users.

use async_trait::async_trait;

use crate::error::Result;
use crate::user::{NewUser, User};

/// Storage of [`User`] rows.
///
/// Every call runs as its own transaction. Implementations must reject a
/// second row holding an already used email with
/// [`ServerError::Conflict`](crate::error::ServerError::Conflict).
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by its surrogate identifier.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Find a user by its email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Scan `limit` users ordered by `id`, skipping the first `offset`.
    async fn find_all(&self, offset: u64, limit: u64) -> Result<Vec<User>>;

    /// Number of stored users.
    async fn count(&self) -> Result<u64>;

    /// Whether a user with `id` exists.
    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// Insert a new user and return it with its assigned `id`.
    async fn insert(&self, user: NewUser) -> Result<User>;

    /// Overwrite `name` and `birth_date` of an existing user.
    ///
    /// Returns `None` if no row has `user.id`.
    async fn update(&self, user: &User) -> Result<Option<User>>;

    /// Remove a user. Returns `false` if no row has `id`.
    async fn delete(&self, id: i64) -> Result<bool>;
}
