//! In-process user storage.
//!
//! Used when no `postgres` entry is configured, and by tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Result, ServerError};
use crate::user::{NewUser, User, UserRepository};

#[derive(Debug, Default)]
struct Table {
    /// Last issued identifier. Never reused, even after a delete.
    sequence: i64,
    rows: BTreeMap<i64, User>,
}

/// In-memory user repository.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    table: RwLock<Table>,
}

impl MemoryUserRepository {
    /// Create an empty [`MemoryUserRepository`].
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .find(|user| user.email.as_deref() == Some(email))
            .cloned())
    }

    async fn find_all(&self, offset: u64, limit: u64) -> Result<Vec<User>> {
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.table.read().await.rows.len() as u64)
    }

    async fn insert(&self, user: NewUser) -> Result<User> {
        let mut table = self.table.write().await;

        if let Some(email) = &user.email {
            if table.rows.values().any(|u| u.email.as_ref() == Some(email)) {
                return Err(ServerError::Conflict(format!(
                    "Key (email)=({email}) already exists."
                )));
            }
        }

        table.sequence += 1;
        let user = User {
            id: table.sequence,
            name: user.name,
            email: user.email,
            birth_date: user.birth_date,
        };
        table.rows.insert(user.id, user.clone());

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<Option<User>> {
        let mut table = self.table.write().await;

        Ok(table.rows.get_mut(&user.id).map(|row| {
            row.name = user.name.clone();
            row.birth_date = user.birth_date;
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str, email: Option<&str>) -> NewUser {
        NewUser {
            name: name.into(),
            email: email.map(Into::into),
            birth_date: None,
        }
    }

    #[tokio::test]
    async fn test_ids_are_never_reused() {
        let repo = MemoryUserRepository::new();

        let first = repo.insert(new_user("Anna", None)).await.unwrap();
        assert!(repo.delete(first.id).await.unwrap());

        let second = repo.insert(new_user("Bert", None)).await.unwrap();
        assert!(second.id > first.id);
        assert!(!repo.exists_by_id(first.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_email_is_unique() {
        let repo = MemoryUserRepository::new();

        repo.insert(new_user("Hans", Some("hans@gmail.com")))
            .await
            .unwrap();
        let err = repo
            .insert(new_user("Maria", Some("hans@gmail.com")))
            .await
            .unwrap_err();

        assert!(matches!(err, ServerError::Conflict(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_email() {
        let repo = MemoryUserRepository::new();

        let mut user = repo
            .insert(new_user("Hans", Some("hans@gmail.com")))
            .await
            .unwrap();
        user.name = "Maria".into();
        user.email = Some("maria@gmail.com".into());

        let updated = repo.update(&user).await.unwrap().unwrap();
        assert_eq!(updated.name, "Maria");
        assert_eq!(updated.email.as_deref(), Some("hans@gmail.com"));

        user.id = 99;
        assert_eq!(repo.update(&user).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_all_pages_by_id() {
        let repo = MemoryUserRepository::new();
        for name in ["Anna", "Bert", "Carl", "Dora"] {
            repo.insert(new_user(name, None)).await.unwrap();
        }

        let page = repo.find_all(2, 10).await.unwrap();
        let names: Vec<_> = page.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Carl", "Dora"]);
        assert!(repo.find_all(4, 10).await.unwrap().is_empty());
    }
}
