use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

/// Minimum number of characters a password must have to be accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

// --- Core Domain Types ---

/// UserRole
///
/// Privilege level of a user. The only permitted transition is `User -> Admin`
/// (promotion); nothing ever moves a user back to `User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

/// UserInfo
///
/// Everything a caller supplies about a user. `username` is the unique, immutable key;
/// `role` is the only field ever mutated after registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub username: String,
    pub name: String,
    pub birthdate: NaiveDateTime,
    pub password: String,
    pub role: UserRole,
}

impl UserInfo {
    /// Builds a regular (`UserRole::User`) user description.
    pub fn new(
        username: impl Into<String>,
        name: impl Into<String>,
        birthdate: NaiveDateTime,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            name: name.into(),
            birthdate,
            password: password.into(),
            role: UserRole::User,
        }
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    /// True when the password meets the minimum length, counted in characters.
    pub fn has_valid_password(&self) -> bool {
        self.password.chars().count() >= MIN_PASSWORD_LEN
    }
}

/// UserEntity
///
/// A registered user. `uid` is assigned by the store and never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntity {
    pub uid: u64,
    pub info: UserInfo,
}

impl UserEntity {
    pub fn is_admin(&self) -> bool {
        self.info.role == UserRole::Admin
    }
}

// --- Request Payloads (Input Schemas) ---

/// RegisterUserRequest
///
/// Body of `POST /user-register`. Every field is required; a missing field or a
/// birthdate that is not `YYYY-MM-DDTHH:MM:SS` is rejected by the JSON extractor (422)
/// before the handler runs.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RegisterUserRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "Alice Liddell")]
    pub name: String,
    #[ts(type = "string")]
    #[schema(value_type = String, example = "2000-01-01T00:00:00")]
    pub birthdate: NaiveDateTime,
    pub password: String,
}

impl From<RegisterUserRequest> for UserInfo {
    /// Self-registration always starts at `UserRole::User`.
    fn from(req: RegisterUserRequest) -> Self {
        UserInfo::new(req.username, req.name, req.birthdate, req.password)
    }
}

// --- Response Schemas (Output) ---

/// UserResponse
///
/// Public view of a `UserEntity`. The password never leaves the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UserResponse {
    pub uid: u64,
    pub username: String,
    pub name: String,
    #[ts(type = "string")]
    #[schema(value_type = String, example = "2000-01-01T00:00:00")]
    pub birthdate: NaiveDateTime,
    pub role: UserRole,
}

impl From<UserEntity> for UserResponse {
    fn from(entity: UserEntity) -> Self {
        Self {
            uid: entity.uid,
            username: entity.info.username,
            name: entity.info.name,
            birthdate: entity.info.birthdate,
            role: entity.info.role,
        }
    }
}

/// ErrorDetail
///
/// Uniform error body: `{"detail": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorDetail {
    pub detail: String,
}

/// HealthStatus
///
/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct HealthStatus {
    #[schema(example = "healthy")]
    pub status: String,
}
