use chrono::{DateTime, Utc};

use crate::{
    config::AppConfig,
    error::ServiceError,
    models::{UserEntity, UserInfo, UserRole},
    repository::RepositoryState,
};

/// UserService
///
/// Registration, lookup and promotion over an injected user store. Cloning is cheap;
/// every clone shares the same store.
#[derive(Clone)]
pub struct UserService {
    repo: RepositoryState,
}

impl UserService {
    /// Wraps an existing store without seeding it.
    pub fn new(repo: RepositoryState) -> Self {
        Self { repo }
    }

    /// initialize
    ///
    /// Builds the service and registers the seed administrator described by `config`.
    /// On a fresh store the seed admin receives uid 1.
    ///
    /// # Errors
    /// Propagates `register` failures, e.g. a configured admin password that is too short.
    pub async fn initialize(repo: RepositoryState, config: &AppConfig) -> Result<Self, ServiceError> {
        let service = Self::new(repo);

        let admin = UserInfo::new(
            config.admin_username.clone(),
            "Administrator",
            DateTime::<Utc>::UNIX_EPOCH.naive_utc(),
            config.admin_password.clone(),
        )
        .with_role(UserRole::Admin);

        service.register(admin).await?;
        Ok(service)
    }

    /// register
    ///
    /// Validates the password, then stores the user under a freshly assigned uid.
    /// The password check runs first, so a weak password is reported as
    /// `Validation` even when the username is also taken.
    pub async fn register(&self, info: UserInfo) -> Result<UserEntity, ServiceError> {
        if !info.has_valid_password() {
            return Err(ServiceError::Validation);
        }
        self.repo.insert_user(info).await
    }

    pub async fn get_by_id(&self, uid: u64) -> Option<UserEntity> {
        self.repo.get_user(uid).await
    }

    pub async fn get_by_username(&self, username: &str) -> Option<UserEntity> {
        self.repo.get_user_by_username(username).await
    }

    /// promote
    ///
    /// Grants the admin role. Promoting an existing admin succeeds and changes nothing.
    pub async fn promote(&self, uid: u64) -> Result<UserEntity, ServiceError> {
        self.repo
            .grant_admin(uid)
            .await
            .ok_or(ServiceError::NotFound)
    }
}
