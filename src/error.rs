use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorDetail;

/// ServiceError
///
/// Failures raised by `UserService`. All of them are recoverable by the caller and a
/// failing operation never leaves the store partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Input is malformed or too weak; retry after fixing it.
    #[error("invalid password")]
    Validation,
    /// Uniqueness violation; pick a different username.
    #[error("username is already taken")]
    Conflict,
    /// The referenced user does not exist.
    #[error("user not found")]
    NotFound,
}

/// AuthError
///
/// Failures raised by the access-control gates. Callers must keep the two apart:
/// `Authentication` maps to 401, `Authorization` to 403.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("unauthorized")]
    Authentication,
    #[error("forbidden")]
    Authorization,
}

/// ApiError
///
/// Transport-level error. Handlers decide which status a core error becomes at their
/// call site; this type only knows how to render it as `{"detail": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    /// Query string or JSON body that could not be deserialized.
    Unprocessable(String),
    Unauthorized,
    Forbidden,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) | ApiError::Unprocessable(msg) => {
                msg.clone()
            }
            ApiError::Unauthorized => AuthError::Authentication.to_string(),
            ApiError::Forbidden => AuthError::Authorization.to_string(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Authentication => ApiError::Unauthorized,
            AuthError::Authorization => ApiError::Forbidden,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Unprocessable(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Unprocessable(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorDetail {
            detail: self.detail(),
        });

        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            // RFC 7235: a 401 must name the challenge scheme.
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Basic"));
        }
        response
    }
}
