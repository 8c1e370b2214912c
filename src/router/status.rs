//! Public server status.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::config::Configuration;
use crate::user::Identity;

/// Structured configuration.
#[derive(Debug, Serialize, Deserialize)]
pub struct Status {
    version: String,
    name: String,
    identity: Identity,
}

/// Public server status (configuration).
pub async fn handler(State(config): State<Arc<Configuration>>) -> Json<Status> {
    Json(Status {
        version: config.version.clone(),
        name: config.name.clone(),
        identity: config.identity,
    })
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::router::users::tests::json_body;
    use crate::*;

    #[tokio::test]
    async fn test_status_handler() {
        let app = app(memory_state(Identity::Email));

        let response =
            make_request(app, Method::GET, "/status.json", String::default())
                .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Status = json_body(response).await;
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(body.identity, Identity::Email);
    }
}
