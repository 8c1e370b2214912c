//! Paginated user listing.

use axum::Json;
use axum::extract::State;

use crate::error::Result;
use crate::router::Pagination;
use crate::user::{Page, UserDto, UserService};

pub async fn handler(
    State(users): State<UserService>,
    pagination: Pagination,
) -> Result<Json<Page<UserDto>>> {
    let page = users
        .list(pagination.page_number, pagination.page_size)
        .await?;

    Ok(Json(page.map(UserDto::from)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::router::users::tests::json_body;
    use crate::user::{Identity, NewUser, Page, UserDto};
    use crate::*;

    async fn state_with(names: &[&str]) -> AppState {
        let state = memory_state(Identity::Id);
        for name in names {
            state
                .users
                .repo
                .insert(NewUser {
                    name: name.to_string(),
                    email: None,
                    birth_date: None,
                })
                .await
                .unwrap();
        }
        state
    }

    #[tokio::test]
    async fn test_list_first_page() {
        let app = app(state_with(&["Anna", "Bert", "Carl", "Dora", "Emil"]).await);

        let response = make_request(
            app,
            Method::GET,
            "/users?pageNumber=1&pageSize=2",
            String::default(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let page: Page<UserDto> = json_body(response).await;
        let names: Vec<_> = page.content.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Anna", "Bert"]);
        assert_eq!(page.page_number, 1);
        assert_eq!(page.page_size, 2);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn test_list_defaults() {
        let app = app(state_with(&["Anna", "Bert"]).await);

        let response =
            make_request(app, Method::GET, "/users", String::default()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let page: Page<UserDto> = json_body(response).await;
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.page_number, 1);
        assert_eq!(page.page_size, 50);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_list_out_of_range() {
        let app = app(state_with(&[]).await);

        for path in [
            "/users?pageNumber=0",
            "/users?pageNumber=10001",
            "/users?pageSize=0",
            "/users?pageSize=101",
            "/users?pageSize=-5",
            "/users?pageNumber=first",
        ] {
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
}
