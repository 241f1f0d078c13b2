use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};

use crate::{
    error::{ApiError, AuthError},
    models::UserEntity,
    service::UserService,
};

/// Credentials
///
/// Username/password pair decoded from an `Authorization: Basic ...` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// parse_basic_credentials
///
/// Decodes the value of an `Authorization` header of the form
/// `Basic base64(username:password)`. The scheme name is case-insensitive and the
/// password may itself contain colons. Any malformation is an authentication failure.
pub fn parse_basic_credentials(header_value: &str) -> Result<Credentials, AuthError> {
    let (scheme, encoded) = header_value
        .trim()
        .split_once(' ')
        .ok_or(AuthError::Authentication)?;

    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(AuthError::Authentication);
    }

    let decoded = BASE64_STANDARD
        .decode(encoded.trim())
        .map_err(|_| AuthError::Authentication)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthError::Authentication)?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or(AuthError::Authentication)?;

    Ok(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// authenticate
///
/// The only identity check in the system. Succeeds iff a stored user has exactly this
/// username and exactly this password; an unknown username and a wrong password are
/// indistinguishable to the caller.
pub async fn authenticate(
    users: &UserService,
    username: &str,
    password: &str,
) -> Result<UserEntity, AuthError> {
    users
        .get_by_username(username)
        .await
        .filter(|entity| entity.info.password == password)
        .ok_or(AuthError::Authentication)
}

/// require_admin
///
/// Gate for admin-only operations on an already-authenticated user. Pure: no store access.
pub fn require_admin(entity: UserEntity) -> Result<UserEntity, AuthError> {
    if entity.is_admin() {
        Ok(entity)
    } else {
        Err(AuthError::Authorization)
    }
}

/// AuthUser Extractor Result
///
/// The user behind a request whose Basic credentials verified against the store.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserEntity);

/// AuthUser Extractor Implementation
///
/// 1. Reads the `Authorization` header.
/// 2. Decodes the Basic credentials.
/// 3. Runs `authenticate` against the shared `UserService`.
///
/// Rejection: 401 with `WWW-Authenticate: Basic` on any failure.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    UserService: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let users = UserService::from_ref(state);

        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let credentials = parse_basic_credentials(header_value).map_err(|e| {
            tracing::warn!("malformed Authorization header");
            ApiError::from(e)
        })?;

        let entity = authenticate(&users, &credentials.username, &credentials.password)
            .await
            .map_err(|e| {
                tracing::warn!(username = %credentials.username, "rejected credentials");
                ApiError::from(e)
            })?;

        Ok(AuthUser(entity))
    }
}

/// AdminUser Extractor Result
///
/// An authenticated user that also holds the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub UserEntity);

/// AdminUser Extractor Implementation
///
/// Authenticates first, then authorizes, so a bad password is always a 401 and a
/// valid non-admin user is always a 403.
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    UserService: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(entity) = AuthUser::from_request_parts(parts, state).await?;

        let uid = entity.uid;
        let admin = require_admin(entity).map_err(|e| {
            tracing::warn!(uid, "admin role required");
            ApiError::from(e)
        })?;

        Ok(AdminUser(admin))
    }
}
