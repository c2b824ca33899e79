use super::ApiStateError;
use crate::content::ContentError;
use crate::store::StoreError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quire_database::DatabaseError;
use quire_derive::api_model;
use std::borrow::Cow;

/// Error returned by every handler.
///
/// Renders as `{ "data": null, "error": { "status", "name", "message" } }`.
#[quire_derive::quire_error]
pub enum ApiError {
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Error details inside the envelope.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub status: u16,
    pub name: String,
    pub message: String,
}

/// Failure envelope; `data` is always `null`.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ErrorEnvelope {
    #[cfg_attr(feature = "server", schema(value_type = Option<Object>))]
    pub data: Option<()>,
    pub error: ErrorBody,
}

impl ApiError {
    #[must_use]
    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }

    #[must_use]
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound { message: message.into(), context: None }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error body sent to the client. Internal details stay in the logs.
    #[must_use]
    pub fn body(&self) -> ErrorBody {
        let (name, message) = match self {
            Self::Validation { message, .. } => ("ValidationError", message.to_string()),
            Self::NotFound { message, .. } => ("NotFoundError", message.to_string()),
            Self::Internal { .. } => ("ApplicationError", "Internal Server Error".to_owned()),
        };
        ErrorBody { status: self.status().as_u16(), name: name.to_owned(), message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Internal { .. }) {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }
        let envelope = ErrorEnvelope { data: None, error: self.body() };
        (self.status(), Json(envelope)).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        Self::Internal { message: err.to_string().into(), context: None }
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::Validation { message, context } => Self::Validation { message, context },
            ContentError::NotFound { message, context } => Self::NotFound { message, context },
            other => Self::Internal { message: other.to_string().into(), context: None },
        }
    }
}

impl From<ApiStateError> for ApiError {
    fn from(err: ApiStateError) -> Self {
        Self::Internal { message: err.to_string().into(), context: None }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Internal { message: err.to_string().into(), context: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_hides_internal_details() {
        let err = ApiError::from("connection pool exhausted");
        let body = err.body();
        assert_eq!(body.status, 500);
        assert_eq!(body.message, "Internal Server Error");
    }

    #[test]
    fn envelope_shape() {
        let envelope =
            ErrorEnvelope { data: None, error: ApiError::validation("Invalid key").body() };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "data": null,
                "error": { "status": 400, "name": "ValidationError", "message": "Invalid key" }
            })
        );
    }

    #[test]
    fn content_errors_keep_their_status() {
        let err: ApiError = ContentError::NotFound { message: "article".into(), context: None }.into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
