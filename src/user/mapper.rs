//! Conversion between wire and stored users.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::user::{NewUser, User, UserDraft};

/// User as sent back to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            birth_date: user.birth_date,
        }
    }
}

impl From<UserDraft> for NewUser {
    /// Any client-supplied `id` is dropped; the store assigns one.
    fn from(draft: UserDraft) -> Self {
        Self {
            name: draft.name,
            email: draft.email,
            birth_date: draft.birth_date,
        }
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// 1-based.
    pub page_number: u64,
    pub page_size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Build a page; `total_pages` is `ceil(total_elements / page_size)`.
    pub fn new(
        content: Vec<T>,
        page_number: u64,
        page_size: u64,
        total_elements: u64,
    ) -> Self {
        Self {
            content,
            page_number,
            page_size,
            total_elements,
            total_pages: total_elements.div_ceil(page_size.max(1)),
        }
    }

    /// Convert every element of the page.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_wire_shape() {
        let dto = UserDto::from(User {
            id: 1,
            name: "Hans".into(),
            email: None,
            birth_date: NaiveDate::from_ymd_opt(1993, 11, 2),
        });

        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            serde_json::json!({ "id": 1, "name": "Hans", "birthDate": "1993-11-02" })
        );
    }

    #[test]
    fn test_draft_id_is_dropped() {
        let user = NewUser::from(UserDraft {
            id: Some(12),
            name: "Hans".into(),
            email: Some("hans@gmail.com".into()),
            birth_date: None,
        });

        assert_eq!(user.name, "Hans");
        assert_eq!(user.email.as_deref(), Some("hans@gmail.com"));
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(Page::<()>::new(vec![], 1, 10, 0).total_pages, 0);
        assert_eq!(Page::<()>::new(vec![], 1, 10, 10).total_pages, 1);
        assert_eq!(Page::<()>::new(vec![], 1, 10, 11).total_pages, 2);
        assert_eq!(Page::<()>::new(vec![], 1, 3, 7).total_pages, 3);
    }
}
