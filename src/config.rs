use std::env;

/// AppConfig
///
/// Immutable application configuration, loaded once at startup and shared through
/// `AppState` via `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Socket address the HTTP server listens on.
    pub bind_addr: String,
    // Username of the administrator seeded into the store at startup.
    pub admin_username: String,
    // Password of the seeded administrator. Must meet the normal password rules.
    pub admin_password: String,
    // Runtime environment marker. Selects the log format and secret requirements.
    pub env: Env,
}

/// Env
///
/// Runtime context: local development or production.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

/// Seed admin password used when none is configured outside production.
pub const LOCAL_ADMIN_PASSWORD: &str = "superSecretAdminPassword123";

impl Default for AppConfig {
    /// default
    ///
    /// Local settings that do not read the environment. Used for test state setup.
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
            admin_username: "admin".to_string(),
            admin_password: LOCAL_ADMIN_PASSWORD.to_string(),
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads configuration from environment variables (`APP_ENV`, `BIND_ADDR`,
    /// `ADMIN_USERNAME`, `ADMIN_PASSWORD`).
    ///
    /// # Panics
    /// Panics in production if `ADMIN_PASSWORD` is not set, so the service never starts
    /// with a publicly known administrator password.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let admin_password = match env {
            Env::Production => env::var("ADMIN_PASSWORD")
                .expect("FATAL: ADMIN_PASSWORD must be set in production."),
            Env::Local => {
                env::var("ADMIN_PASSWORD").unwrap_or_else(|_| LOCAL_ADMIN_PASSWORD.to_string())
            }
        };

        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            admin_username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            admin_password,
            env,
        }
    }
}
