mod mapper;
mod memory;
mod postgres;
mod repository;
mod service;
mod validation;

pub use mapper::*;
pub use memory::*;
pub use postgres::*;
pub use repository::*;
pub use service::*;
pub use validation::*;

use std::fmt;

use serde::{Deserialize, Serialize};

/// User as saved on database.
#[derive(
    Clone, Debug, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow,
)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub birth_date: Option<chrono::NaiveDate>,
}

/// A user not yet persisted. The store assigns its `id`.
#[derive(Clone, Debug, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: Option<String>,
    pub birth_date: Option<chrono::NaiveDate>,
}

/// Which key identifies a user on reads, deletes and upserts.
///
/// Fixed per deployment on `config.yaml`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Identity {
    /// Store-assigned integer identifier.
    #[default]
    Id,
    /// Email address, unique across users.
    Email,
}

/// Resolved lookup key of a [`User`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserKey {
    Id(i64),
    Email(String),
}

impl UserKey {
    /// Name of the key, used on error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            UserKey::Id(_) => "id",
            UserKey::Email(_) => "email",
        }
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserKey::Id(id) => write!(f, "{id}"),
            UserKey::Email(email) => write!(f, "{email}"),
        }
    }
}
