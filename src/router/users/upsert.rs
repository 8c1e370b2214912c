//! Create or update a user.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::Result;
use crate::router::ValidWithState;
use crate::user::UserDto;

pub async fn handler(
    State(state): State<AppState>,
    ValidWithState(draft): ValidWithState,
) -> Result<Json<UserDto>> {
    Ok(Json(state.users.upsert(draft).await?.into()))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use chrono::NaiveDate;
    use serde_json::json;

    use crate::router::users::tests::json_body;
    use crate::user::{Identity, NewUser, UserDto};
    use crate::*;

    #[tokio::test]
    async fn test_modify_existing_user() {
        let state = memory_state(Identity::Id);
        let saved = state
            .users
            .repo
            .insert(NewUser {
                name: "Hans".into(),
                email: None,
                birth_date: NaiveDate::from_ymd_opt(1993, 11, 2),
            })
            .await
            .unwrap();
        let app = app(state.clone());

        let response = make_request(
            app,
            Method::PUT,
            "/users",
            json!({ "id": saved.id, "name": "Maria", "birthDate": "1993-11-02" })
                .to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: UserDto = json_body(response).await;
        assert_eq!(body.id, saved.id);
        assert_eq!(body.name, "Maria");
        assert_eq!(body.birth_date, NaiveDate::from_ymd_opt(1993, 11, 2));

        let stored = state.users.repo.find_by_id(saved.id).await.unwrap();
        assert_eq!(stored.unwrap().name, "Maria");
        assert_eq!(state.users.repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_put_with_unknown_id_creates() {
        let state = memory_state(Identity::Id);
        let app = app(state.clone());
        assert!(!state.users.repo.exists_by_id(73).await.unwrap());

        let response = make_request(
            app,
            Method::PUT,
            "/users",
            json!({ "id": 73, "name": "Hans", "birthDate": "1993-11-02" })
                .to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: UserDto = json_body(response).await;
        assert_ne!(body.id, 73);
        assert_eq!(body.name, "Hans");

        let stored = state.users.repo.find_by_id(body.id).await.unwrap();
        assert_eq!(stored.unwrap().birth_date, body.birth_date);
    }

    #[tokio::test]
    async fn test_put_by_email() {
        let state = memory_state(Identity::Email);
        let app = app(state.clone());

        let response = make_request(
            app.clone(),
            Method::PUT,
            "/users",
            json!({ "name": "Hans", "email": "hans@gmail.com" }).to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let created: UserDto = json_body(response).await;

        let response = make_request(
            app.clone(),
            Method::PUT,
            "/users",
            json!({
                "name": "Johann",
                "email": "hans@gmail.com",
                "birthDate": "1993-11-02"
            })
            .to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated: UserDto = json_body(response).await;

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Johann");
        assert_eq!(updated.birth_date, NaiveDate::from_ymd_opt(1993, 11, 2));
        assert_eq!(state.users.repo.count().await.unwrap(), 1);

        // email is mandatory when it identifies users.
        let response = make_request(
            app,
            Method::PUT,
            "/users",
            json!({ "name": "Johann" }).to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
