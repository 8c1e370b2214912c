//! Inbound user representation and its checks.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex_lite::Regex;
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{Result, ServerError};
use crate::user::{Identity, UserKey};

const DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w\-.]+@([\w-]+\.)+[\w-]{2,4}$")
        .expect("email pattern must compile")
});

/// `chrono` accepts unpadded fields and signs, so the shape is checked first.
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$")
        .expect("date pattern must compile")
});

/// User as sent by clients on `POST` and `PUT`.
///
/// `birthDate` stays a string here so a bad date is reported as malformed
/// input instead of a generic body rejection.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    #[validate(range(min = 1, message = "Id must be a positive integer."))]
    pub id: Option<i64>,
    #[validate(
        required(message = "Name is required."),
        length(min = 3, max = 30, message = "Name must be 3 to 30 characters long.")
    )]
    pub name: Option<String>,
    #[validate(
        length(max = 255, message = "Email must be at most 255 characters long."),
        custom(
            function = "crate::user::validate_email",
            message = "Email must be formatted."
        )
    )]
    pub email: Option<String>,
    pub birth_date: Option<String>,
}

/// A [`UserBody`] that passed every check.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDraft {
    pub id: Option<i64>,
    pub name: String,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl UserDraft {
    /// Key carried by the draft under the deployment `identity`, if any.
    pub fn key(&self, identity: Identity) -> Option<UserKey> {
        match identity {
            Identity::Id => self.id.map(UserKey::Id),
            Identity::Email => self.email.clone().map(UserKey::Email),
        }
    }
}

/// Whether `email` has a `local-part@domain.tld` shape.
pub fn is_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Custom validator for email fields.
pub fn validate_email(email: &str) -> std::result::Result<(), ValidationError> {
    if is_email(email) {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

fn invalid(field: &'static str, code: &'static str, message: &'static str) -> ServerError {
    let mut errors = ValidationErrors::new();
    errors.add(
        field,
        ValidationError::new(code).with_message(message.into()),
    );
    errors.into()
}

/// Parse an ISO `YYYY-MM-DD` calendar date.
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    if !DATE.is_match(date) {
        return Err(ServerError::MalformedInput(format!(
            "birthDate '{date}' is not a YYYY-MM-DD date"
        )));
    }

    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|err| {
        ServerError::MalformedInput(format!(
            "birthDate '{date}' is not a YYYY-MM-DD date: {err}"
        ))
    })
}

/// Check an inbound user and turn it into a [`UserDraft`].
///
/// Email becomes mandatory when users are identified by email.
pub fn validate_user(body: UserBody, identity: Identity) -> Result<UserDraft> {
    let birth_date = body.birth_date.as_deref().map(parse_date).transpose()?;

    let mut errors = body.validate().err().unwrap_or_else(ValidationErrors::new);
    if identity == Identity::Email && body.email.is_none() {
        errors.add(
            "email",
            ValidationError::new("required")
                .with_message("Email is required.".into()),
        );
    }
    if !errors.is_empty() {
        return Err(errors.into());
    }

    Ok(UserDraft {
        id: body.id,
        name: body.name.unwrap_or_default(),
        email: body.email,
        birth_date,
    })
}

/// Parse a `/users/{key}` path segment under the deployment `identity`.
pub fn parse_key(raw: &str, identity: Identity) -> Result<UserKey> {
    match identity {
        Identity::Id => match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(UserKey::Id(id)),
            _ => Err(invalid(
                "id",
                "range",
                "Id must be a positive integer.",
            )),
        },
        Identity::Email if is_email(raw) => Ok(UserKey::Email(raw.to_owned())),
        Identity::Email => {
            Err(invalid("email", "email", "Email must be formatted."))
        },
    }
}
