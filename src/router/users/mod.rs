//! Users-related HTTP API.
mod create;
mod delete;
mod get;
mod list;
mod upsert;

use axum::Router;
use axum::routing::get;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // `GET /users` goes to `list`, `POST` to `create`, `PUT` to `upsert`.
        .route(
            "/",
            get(list::handler)
                .post(create::handler)
                .put(upsert::handler),
        )
        // `GET /users/{key}` goes to `get`, `DELETE` to `delete`.
        .route("/{key}", get(get::handler).delete(delete::handler))
}

#[cfg(test)]
pub(crate) mod tests {
    use axum::body::Body;
    use axum::http::Response;
    use http_body_util::BodyExt;
    use serde::de::DeserializeOwned;

    /// Decode a JSON response body.
    pub async fn json_body<T: DeserializeOwned>(response: Response<Body>) -> T {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }
}
