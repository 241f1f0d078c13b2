use crate::{AppState, handlers};
use axum::{Router, routing::post};

/// Admin Router Module
///
/// Routes exclusively for users with the `admin` role.
///
/// Access Control:
/// Each handler takes the `AdminUser` extractor as its first argument. It authenticates
/// the caller (401 on failure) and only then checks the role (403 on failure).
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // POST /user-promote?id=...
        // One-way promotion of a user to `admin`. Idempotent.
        .route("/user-promote", post(handlers::promote_user))
}
