use crate::{
    AppState,
    auth::AdminUser,
    error::{ApiError, ServiceError},
    models::{HealthStatus, RegisterUserRequest, UserInfo, UserResponse},
};
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;

// --- Query Structs ---

/// UserLookup
///
/// Query parameters of `POST /user-get`. Exactly one of the two must be supplied.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserLookup {
    /// Look the user up by uid.
    pub id: Option<u64>,
    /// Look the user up by username.
    pub username: Option<String>,
}

/// PromoteTarget
///
/// Query parameters of `POST /user-promote`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PromoteTarget {
    /// uid of the user to promote.
    pub id: u64,
}

// --- Handlers ---

/// health_check
///
/// [Public Route] Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthStatus))
)]
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
    })
}

/// register_user
///
/// [Public Route] Self-registration. New users always start with the `user` role.
///
/// Both a weak password and a taken username are 400s, distinguished by `detail`.
#[utoipa::path(
    post,
    path = "/user-register",
    request_body = RegisterUserRequest,
    responses(
        (status = 200, description = "Registered", body = UserResponse),
        (status = 400, description = "Invalid password or username taken", body = crate::models::ErrorDetail),
        (status = 422, description = "Malformed body", body = crate::models::ErrorDetail)
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    payload: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Json(payload) = payload?;
    let entity = state
        .users
        .register(UserInfo::from(payload))
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    tracing::info!(uid = entity.uid, username = %entity.info.username, "user registered");
    Ok(Json(UserResponse::from(entity)))
}

/// get_user
///
/// [Authenticated Route] Looks a user up by `id` or by `username`.
///
/// Supplying both or neither is a request-shape error (400). An unknown user is a 404.
/// A query string that does not deserialize is a 422.
#[utoipa::path(
    post,
    path = "/user-get",
    params(UserLookup),
    responses(
        (status = 200, description = "Found", body = UserResponse),
        (status = 400, description = "Both or neither lookup keys", body = crate::models::ErrorDetail),
        (status = 401, description = "Bad or missing credentials", body = crate::models::ErrorDetail),
        (status = 404, description = "Not Found", body = crate::models::ErrorDetail),
        (status = 422, description = "Malformed query string", body = crate::models::ErrorDetail)
    ),
    security(("basic" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    lookup: Result<Query<UserLookup>, QueryRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Query(lookup) = lookup?;
    let entity = match (lookup.id, lookup.username) {
        (Some(_), Some(_)) => {
            return Err(ApiError::BadRequest(
                "both id and username are provided".to_string(),
            ));
        }
        (None, None) => {
            return Err(ApiError::BadRequest(
                "neither id nor username are provided".to_string(),
            ));
        }
        (Some(uid), None) => state.users.get_by_id(uid).await,
        (None, Some(username)) => state.users.get_by_username(&username).await,
    };

    match entity {
        Some(entity) => {
            tracing::debug!(uid = entity.uid, "user lookup hit");
            Ok(Json(UserResponse::from(entity)))
        }
        None => Err(ApiError::NotFound(ServiceError::NotFound.to_string())),
    }
}

/// promote_user
///
/// [Admin Route] Grants the admin role to the user with the given uid.
///
/// *Authorization*: the `AdminUser` extractor authenticates (401) and then checks the
/// role (403) before the body of this handler runs. An unknown target is reported as
/// 400 `user not found`, unlike the 404 of `get_user`.
#[utoipa::path(
    post,
    path = "/user-promote",
    params(PromoteTarget),
    responses(
        (status = 200, description = "Promoted"),
        (status = 400, description = "Target user not found", body = crate::models::ErrorDetail),
        (status = 401, description = "Bad or missing credentials", body = crate::models::ErrorDetail),
        (status = 403, description = "Caller is not an admin", body = crate::models::ErrorDetail),
        (status = 422, description = "Missing or non-numeric id", body = crate::models::ErrorDetail)
    ),
    security(("basic" = []))
)]
pub async fn promote_user(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    target: Result<Query<PromoteTarget>, QueryRejection>,
) -> Result<StatusCode, ApiError> {
    let Query(target) = target?;
    let promoted = state
        .users
        .promote(target.id)
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    tracing::info!(uid = promoted.uid, by = admin.uid, "user promoted to admin");
    Ok(StatusCode::OK)
}
