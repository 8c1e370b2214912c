//! Get a user by key.

use axum::Json;
use axum::extract::State;

use crate::error::Result;
use crate::router::Key;
use crate::user::{UserDto, UserService};

pub async fn handler(
    State(users): State<UserService>,
    Key(key): Key,
) -> Result<Json<UserDto>> {
    Ok(Json(users.get(&key).await?.into()))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use chrono::NaiveDate;

    use crate::router::users::tests::json_body;
    use crate::user::{Identity, NewUser, UserDto};
    use crate::*;

    #[tokio::test]
    async fn test_get_user_handler() {
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
        assert!(state.users.repo.exists_by_id(saved.id).await.unwrap());
        let app = app(state);

        let path = format!("/users/{}", saved.id);
        let response =
            make_request(app, Method::GET, &path, String::default()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: UserDto = json_body(response).await;
        assert_eq!(body.id, saved.id);
        assert_eq!(body.name, "Hans");
        assert_eq!(body.birth_date, NaiveDate::from_ymd_opt(1993, 11, 2));
    }

    #[tokio::test]
    async fn test_get_unknown_user() {
        let app = app(memory_state(Identity::Id));

        let response =
            make_request(app, Method::GET, "/users/41", String::default())
                .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = json_body(response).await;
        assert_eq!(body["detail"], "User with id '41' could not be found.");
    }

    #[tokio::test]
    async fn test_get_with_malformed_id() {
        let app = app(memory_state(Identity::Id));

        for path in ["/users/abc", "/users/0", "/users/-1"] {
            let response = make_request(
                app.clone(),
                Method::GET,
                path,
                String::default(),
            )
            .await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
        }
    }

    #[tokio::test]
    async fn test_get_by_email() {
        let state = memory_state(Identity::Email);
        state
            .users
            .repo
            .insert(NewUser {
                name: "Hans".into(),
                email: Some("hans@gmail.com".into()),
                birth_date: None,
            })
            .await
            .unwrap();
        let app = app(state);

        let response = make_request(
            app.clone(),
            Method::GET,
            "/users/hans@gmail.com",
            String::default(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: UserDto = json_body(response).await;
        assert_eq!(body.email.as_deref(), Some("hans@gmail.com"));

        let response =
            make_request(app, Method::GET, "/users/hans", String::default())
                .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
