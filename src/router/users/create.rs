//! Create a user.

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};

use crate::AppState;
use crate::error::Result;
use crate::router::ValidWithState;
use crate::user::{Identity, UserDto};

/// Handler to create user.
pub async fn handler(
    State(state): State<AppState>,
    ValidWithState(draft): ValidWithState,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<UserDto>)> {
    let user = state.users.create(draft).await?;

    let key = match (state.config.identity, &user.email) {
        (Identity::Email, Some(email)) => email.clone(),
        _ => user.id.to_string(),
    };

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/users/{key}"))],
        Json(user.into()),
    ))
}
