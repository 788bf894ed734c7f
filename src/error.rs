use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        if let Error::Validation(errors) = &self {
            let body = Json(json!({
                "error": "Validation failed",
                "fields": field_messages(errors),
            }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }
        if let Error::InvalidField { field, message } = &self {
            let fields = BTreeMap::from([(field.clone(), vec![message.clone()])]);
            let body = Json(json!({
                "error": "Validation failed",
                "fields": fields,
            }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        let (status, error_message) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Error::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::Json(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Database(err) => {
                tracing::error!(error = ?err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            Error::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

fn field_messages(errors: &validator::ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            other => Error::Database(other),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        let text = rejection.body_text();
        if let JsonRejection::JsonDataError(_) = rejection {
            if let Some((field, message)) = field_error(&text) {
                return Error::InvalidField {
                    field: field.to_string(),
                    message: message.to_string(),
                };
            }
        }
        Error::BadRequest(text)
    }
}

/// Splits "<prefix>: <path>: <reason> at line L column C" into path and reason.
fn field_error(text: &str) -> Option<(&str, &str)> {
    let (_, detail) = text.split_once(": ")?;
    let (path, message) = detail.split_once(": ")?;
    if path.is_empty() || path.contains(char::is_whitespace) {
        return None;
    }
    let message = message
        .rsplit_once(" at line ")
        .map_or(message, |(reason, _)| reason);
    Some((path, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_error_names_the_field() {
        let text = "Failed to deserialize the JSON body into the target type: \
                    max_guests: invalid type: string \"two\", expected i32 at line 1 column 20";
        assert_eq!(
            field_error(text),
            Some(("max_guests", "invalid type: string \"two\", expected i32"))
        );
    }

    #[test]
    fn root_level_error_has_no_field() {
        let text = "Failed to deserialize the JSON body into the target type: \
                    invalid type: sequence, expected struct at line 1 column 0";
        assert_eq!(field_error(text), None);
    }
}
