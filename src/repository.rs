use crate::error::ServiceError;
use crate::models::{UserEntity, UserInfo, UserRole};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Repository Trait
///
/// The user store contract. Implementations own the uid counter and both indices
/// (uid and username) and must apply every mutation atomically: a caller either sees
/// the whole effect or none of it.
///
/// **Send + Sync + async_trait** are required so that `Arc<dyn Repository>` can be shared
/// across Axum's request tasks.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Stores a new user under the next uid.
    ///
    /// Fails with `ServiceError::Conflict` if the username is already present, in which
    /// case no uid is consumed.
    async fn insert_user(&self, info: UserInfo) -> Result<UserEntity, ServiceError>;

    async fn get_user(&self, uid: u64) -> Option<UserEntity>;

    async fn get_user_by_username(&self, username: &str) -> Option<UserEntity>;

    /// Sets the user's role to `Admin`. Returns `None` if the uid is unknown.
    /// Roles are never lowered.
    async fn grant_admin(&self, uid: u64) -> Option<UserEntity>;
}

/// RepositoryState
///
/// The concrete type used to share the store across the application state.
pub type RepositoryState = Arc<dyn Repository>;

#[derive(Default)]
struct Tables {
    last_uid: u64,
    by_uid: HashMap<u64, UserEntity>,
    uid_by_username: HashMap<String, u64>,
}

/// InMemoryRepository
///
/// Process-local store. Both indices and the uid counter live behind a single
/// `RwLock`, so register and promote are serialized against each other while lookups
/// proceed in parallel.
#[derive(Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert_user(&self, info: UserInfo) -> Result<UserEntity, ServiceError> {
        let mut tables = self.tables.write().await;

        if tables.uid_by_username.contains_key(&info.username) {
            return Err(ServiceError::Conflict);
        }

        tables.last_uid += 1;
        let entity = UserEntity {
            uid: tables.last_uid,
            info,
        };

        tables
            .uid_by_username
            .insert(entity.info.username.clone(), entity.uid);
        tables.by_uid.insert(entity.uid, entity.clone());

        Ok(entity)
    }

    async fn get_user(&self, uid: u64) -> Option<UserEntity> {
        self.tables.read().await.by_uid.get(&uid).cloned()
    }

    async fn get_user_by_username(&self, username: &str) -> Option<UserEntity> {
        let tables = self.tables.read().await;
        tables
            .uid_by_username
            .get(username)
            .and_then(|uid| tables.by_uid.get(uid))
            .cloned()
    }

    async fn grant_admin(&self, uid: u64) -> Option<UserEntity> {
        let mut tables = self.tables.write().await;
        let entity = tables.by_uid.get_mut(&uid)?;
        entity.info.role = UserRole::Admin;
        Some(entity.clone())
    }
}
