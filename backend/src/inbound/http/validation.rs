//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies arrive as DTOs with every field optional. The helpers here
//! turn absent fields, malformed dates, and domain validation failures into
//! `InvalidRequest` errors carrying `{field, code}` details.

use std::str::FromStr;

use chrono::NaiveDate;
use serde_json::json;
use tracing::debug;

use crate::domain::{
    EmptyTextError, Error, IdValidationError, LoginValidationError, ProfileValidationError,
    UserValidationError,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidDate,
    InvalidEmail,
    PasswordTooShort,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::PasswordTooShort => "password_too_short",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} is required")).with_code(ErrorCode::MissingField)
}

/// Require a string field to be present; blank strings are passed through so
/// domain constructors can reject them with their own messages.
pub(crate) fn require_field(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn invalid_date_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a YYYY-MM-DD date"))
        .with_value(ErrorCode::InvalidDate, value)
}

/// Parse an optional `YYYY-MM-DD` date; blank strings count as absent.
pub(crate) fn parse_optional_date(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<NaiveDate>, Error> {
    match value {
        Some(raw) if !raw.trim().is_empty() => NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
            .map(Some)
            .map_err(|_| invalid_date_error(field, &raw)),
        _ => Ok(None),
    }
}

/// Parse an identifier taken from the request path.
///
/// A malformed id cannot name an existing document, so it is reported as
/// `NotFound` with the same message the service would use.
pub(crate) fn parse_path_id<T>(raw: &str, not_found: &'static str) -> Result<T, Error>
where
    T: FromStr<Err = IdValidationError>,
{
    raw.parse().map_err(|err: IdValidationError| {
        debug!(id = raw, error = %err, "malformed path identifier");
        Error::not_found(not_found)
    })
}

pub(crate) fn map_user_validation_error(err: UserValidationError) -> Error {
    let message = err.to_string();
    match err {
        UserValidationError::EmptyName => missing_field_error(FieldName::new("name")),
        UserValidationError::InvalidEmail => {
            ValidationError::new("email", message).with_code(ErrorCode::InvalidEmail)
        }
        UserValidationError::PasswordTooShort { .. } => {
            ValidationError::new("password", message).with_code(ErrorCode::PasswordTooShort)
        }
    }
}

pub(crate) fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::InvalidEmail => {
            ValidationError::new("email", err.to_string()).with_code(ErrorCode::InvalidEmail)
        }
        LoginValidationError::EmptyPassword => missing_field_error(FieldName::new("password")),
    }
}

pub(crate) fn map_profile_validation_error(err: ProfileValidationError) -> Error {
    ValidationError::new(err.field(), err.to_string()).with_code(ErrorCode::MissingField)
}

pub(crate) fn map_text_error(_: EmptyTextError) -> Error {
    missing_field_error(FieldName::new("text"))
}
