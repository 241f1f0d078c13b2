/// Router Module Index
///
/// Routes grouped by the access level they require. Guards are applied per module
/// (Axum layers or extractors), so a handler cannot end up exposed by accident.

/// Routes open to anonymous clients: health and self-registration.
pub mod public;

/// Routes behind the `AuthUser` middleware. Any registered user with valid
/// Basic credentials may call them.
pub mod authenticated;

/// Routes restricted to users with the `admin` role.
pub mod admin;
