use chrono::NaiveDate;
use std::sync::Arc;
use user_demo_service::{
    AppConfig, AuthError, InMemoryRepository, RepositoryState, ServiceError, UserService,
    auth::authenticate,
    models::{UserInfo, UserRole},
};

// --- Test Utilities ---

fn birthdate() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn info(username: &str, password: &str) -> UserInfo {
    UserInfo::new(username, "Some Name", birthdate(), password)
}

/// Fresh, unseeded service per test.
fn empty_service() -> UserService {
    UserService::new(Arc::new(InMemoryRepository::new()) as RepositoryState)
}

async fn seeded_service() -> UserService {
    let repo = Arc::new(InMemoryRepository::new()) as RepositoryState;
    UserService::initialize(repo, &AppConfig::default())
        .await
        .expect("seed admin")
}

// --- register ---

#[tokio::test]
async fn test_register_then_get_by_id_returns_equal_entity() {
    let service = empty_service();

    let entity = service
        .register(info("alice", "validPassword123"))
        .await
        .unwrap();

    assert_eq!(entity.info.role, UserRole::User);
    assert_eq!(service.get_by_id(entity.uid).await, Some(entity));
}

#[tokio::test]
async fn test_register_rejects_short_passwords() {
    let service = empty_service();

    for password in ["", "a", "short", "1234567"] {
        let err = service.register(info("bob", password)).await.unwrap_err();
        assert_eq!(err, ServiceError::Validation, "password {password:?}");
    }

    // Nothing was stored by the failed attempts.
    assert!(service.get_by_username("bob").await.is_none());
}

#[tokio::test]
async fn test_register_accepts_exactly_minimum_length() {
    let service = empty_service();
    assert!(service.register(info("carol", "12345678")).await.is_ok());
}

#[tokio::test]
async fn test_password_length_counts_characters_not_bytes() {
    let service = empty_service();

    // 7 characters, 14 bytes.
    let err = service
        .register(info("dmitri", "пароль1"))
        .await
        .unwrap_err();
    assert_eq!(err, ServiceError::Validation);

    // 8 characters.
    assert!(service.register(info("dmitri", "пароль12")).await.is_ok());
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts_even_with_other_fields() {
    let service = empty_service();
    service
        .register(info("dupe", "validPassword123"))
        .await
        .unwrap();

    let other = UserInfo::new("dupe", "Different Name", birthdate(), "anotherPassword")
        .with_role(UserRole::Admin);
    let err = service.register(other).await.unwrap_err();

    assert_eq!(err, ServiceError::Conflict);
    assert_eq!(
        service.get_by_username("dupe").await.unwrap().info.name,
        "Some Name"
    );
}

#[tokio::test]
async fn test_weak_password_reported_before_conflict() {
    let service = empty_service();
    service
        .register(info("taken", "validPassword123"))
        .await
        .unwrap();

    let err = service.register(info("taken", "short")).await.unwrap_err();
    assert_eq!(err, ServiceError::Validation);
}

#[tokio::test]
async fn test_register_can_create_admin_explicitly() {
    let service = empty_service();
    let entity = service
        .register(info("boss", "validPassword123").with_role(UserRole::Admin))
        .await
        .unwrap();

    assert!(entity.is_admin());
}

// --- lookups ---

#[tokio::test]
async fn test_lookups_of_unknown_users_return_none() {
    let service = seeded_service().await;

    assert!(service.get_by_id(132132).await.is_none());
    assert!(service.get_by_username("unknownUser").await.is_none());
}

#[tokio::test]
async fn test_seeded_admin_is_present() {
    let service = seeded_service().await;

    let admin = service.get_by_username("admin").await.unwrap();
    assert_eq!(admin.uid, 1);
    assert_eq!(admin.info.role, UserRole::Admin);

    let next = service
        .register(info("after_seed", "validPassword123"))
        .await
        .unwrap();
    assert_eq!(next.uid, 2);
}

// --- promote ---

#[tokio::test]
async fn test_promote_is_idempotent() {
    let service = empty_service();
    let entity = service
        .register(info("riser", "validPassword123"))
        .await
        .unwrap();

    let first = service.promote(entity.uid).await.unwrap();
    let second = service.promote(entity.uid).await.unwrap();

    assert_eq!(first.info.role, UserRole::Admin);
    assert_eq!(second, first);
}

#[tokio::test]
async fn test_promote_unknown_uid_is_not_found() {
    let service = seeded_service().await;

    let err = service.promote(132132).await.unwrap_err();
    assert_eq!(err, ServiceError::NotFound);
}

#[tokio::test]
async fn test_promote_changes_only_the_role() {
    let service = empty_service();
    let before = service
        .register(info("steady", "validPassword123"))
        .await
        .unwrap();

    let after = service.promote(before.uid).await.unwrap();

    assert_eq!(after.uid, before.uid);
    assert_eq!(after.info.username, before.info.username);
    assert_eq!(after.info.password, before.info.password);
    assert_eq!(after.info.birthdate, before.info.birthdate);
}

// --- scenario ---

#[tokio::test]
async fn test_alice_scenario() {
    let service = seeded_service().await;

    let alice = service
        .register(info("alice", "validPassword123"))
        .await
        .unwrap();

    assert_eq!(
        service
            .register(info("alice", "validPassword123"))
            .await
            .unwrap_err(),
        ServiceError::Conflict
    );

    let promoted = service.promote(alice.uid).await.unwrap();
    assert_eq!(promoted.info.role, UserRole::Admin);

    let authenticated = authenticate(&service, "alice", "validPassword123")
        .await
        .unwrap();
    assert_eq!(authenticated, promoted);

    assert_eq!(
        authenticate(&service, "alice", "wrong").await,
        Err(AuthError::Authentication)
    );
}

#[test]
fn test_error_messages_match_wire_details() {
    assert_eq!(ServiceError::Validation.to_string(), "invalid password");
    assert_eq!(ServiceError::Conflict.to_string(), "username is already taken");
    assert_eq!(ServiceError::NotFound.to_string(), "user not found");
}
