use std::sync::Arc;

use crate::error::{Result, ServerError};
use crate::user::{
    Identity, NewUser, Page, User, UserDraft, UserKey, UserRepository,
};

/// User manager.
///
/// Resolves whether a save creates or updates a row, according to the
/// deployment [`Identity`].
#[derive(Clone)]
pub struct UserService {
    pub repo: Arc<dyn UserRepository>,
    pub identity: Identity,
}

impl UserService {
    /// Create a new [`UserService`].
    pub fn new(repo: Arc<dyn UserRepository>, identity: Identity) -> Self {
        Self { repo, identity }
    }

    async fn find(&self, key: &UserKey) -> Result<Option<User>> {
        match key {
            UserKey::Id(id) => self.repo.find_by_id(*id).await,
            UserKey::Email(email) => self.repo.find_by_email(email).await,
        }
    }

    /// Get a user by `key`.
    pub async fn get(&self, key: &UserKey) -> Result<User> {
        self.find(key)
            .await?
            .ok_or_else(|| ServerError::NotFound { key: key.clone() })
    }

    /// List users ordered by `id`. `page_number` starts at 1.
    pub async fn list(
        &self,
        page_number: u64,
        page_size: u64,
    ) -> Result<Page<User>> {
        let offset = page_number.saturating_sub(1).saturating_mul(page_size);

        let users = self.repo.find_all(offset, page_size).await?;
        let total = self.repo.count().await?;

        Ok(Page::new(users, page_number, page_size, total))
    }

    /// Insert `draft` as a new user.
    ///
    /// A client-supplied `id` is ignored.
    pub async fn create(&self, draft: UserDraft) -> Result<User> {
        let user = self.repo.insert(NewUser::from(draft)).await?;

        metrics::counter!("users_saved_total", "outcome" => "created")
            .increment(1);
        tracing::info!(user_id = user.id, "user created");

        Ok(user)
    }

    /// Update the user `draft` points to, or create it.
    ///
    /// Only `name` and `birth_date` of an existing user are overwritten.
    pub async fn upsert(&self, draft: UserDraft) -> Result<User> {
        let existing = match draft.key(self.identity) {
            Some(key) => self.find(&key).await?,
            None => None,
        };

        let Some(mut user) = existing else {
            return self.create(draft).await;
        };

        user.name = draft.name.clone();
        user.birth_date = draft.birth_date;

        match self.repo.update(&user).await? {
            Some(user) => {
                metrics::counter!("users_saved_total", "outcome" => "updated")
                    .increment(1);
                tracing::info!(user_id = user.id, "user updated");

                Ok(user)
            },
            // Deleted since it was read.
            None => self.create(draft).await,
        }
    }

    /// Delete the user found with `key`.
    pub async fn delete(&self, key: &UserKey) -> Result<()> {
        let user = self.get(key).await?;

        if !self.repo.delete(user.id).await? {
            return Err(ServerError::NotFound { key: key.clone() });
        }

        tracing::info!(user_id = user.id, "user deleted");
        Ok(())
    }
}
