//! HTTP routes and their extractors.
pub mod status;
pub mod users;

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use serde::Deserialize;
use validator::{ValidationError, ValidationErrors};

use crate::AppState;
use crate::error::ServerError;
use crate::user::{UserBody, UserDraft, UserKey, parse_key, validate_user};

/// User body validated against the deployment identity.
#[derive(Debug)]
pub struct ValidWithState(pub UserDraft);

impl FromRequest<AppState> for ValidWithState {
    type Rejection = ServerError;

    async fn from_request(
        req: Request,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<UserBody>::from_request(req, state).await?;
        Ok(ValidWithState(validate_user(body, state.config.identity)?))
    }
}

/// `/users/{key}` path segment, parsed under the deployment identity.
#[derive(Debug)]
pub struct Key(pub UserKey);

impl FromRequestParts<AppState> for Key {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        Ok(Key(parse_key(&raw, state.config.identity)?))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    page_number: Option<u64>,
    page_size: Option<u64>,
}

/// Bounded, 1-based pagination.
#[derive(Debug, PartialEq)]
pub struct Pagination {
    pub page_number: u64,
    pub page_size: u64,
}

impl FromRequestParts<AppState> for Pagination {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Query(params) =
            Query::<PageParams>::from_request_parts(parts, state).await?;
        let bounds = &state.config.pagination;

        let pagination = Pagination {
            page_number: params.page_number.unwrap_or(1),
            page_size: params.page_size.unwrap_or(bounds.default_page_size),
        };

        let mut errors = ValidationErrors::new();
        if !(1..=bounds.max_page_number).contains(&pagination.page_number) {
            errors.add(
                "pageNumber",
                ValidationError::new("range").with_message(
                    format!(
                        "Page number must be between 1 and {}.",
                        bounds.max_page_number
                    )
                    .into(),
                ),
            );
        }
        if !(1..=bounds.max_page_size).contains(&pagination.page_size) {
            errors.add(
                "pageSize",
                ValidationError::new("range").with_message(
                    format!(
                        "Page size must be between 1 and {}.",
                        bounds.max_page_size
                    )
                    .into(),
                ),
            );
        }

        if errors.is_empty() {
            Ok(pagination)
        } else {
            Err(errors.into())
        }
    }
}
