//! Delete user from database.

use axum::extract::State;
use axum::http::StatusCode;

use crate::error::Result;
use crate::router::Key;
use crate::user::UserService;

pub async fn handler(
    State(users): State<UserService>,
    Key(key): Key,
) -> Result<StatusCode> {
    users.delete(&key).await?;
    Ok(StatusCode::NO_CONTENT)
}
