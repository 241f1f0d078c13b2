use crate::{AppState, handlers};
use axum::{Router, routing::post};

/// Authenticated Router Module
///
/// Every route here sits behind the `auth_middleware` layer applied in `create_router`,
/// which rejects the request with 401 unless the Basic credentials verify.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // POST /user-get?id=...|username=...
        // Looks up a single user. Exactly one of the two query parameters is accepted.
        .route("/user-get", post(handlers::get_user))
}
