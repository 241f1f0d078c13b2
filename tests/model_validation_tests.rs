use chrono::NaiveDate;
use serde_json::json;
use user_demo_service::models::{
    MIN_PASSWORD_LEN, RegisterUserRequest, UserEntity, UserInfo, UserResponse, UserRole,
};

fn birthdate() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[test]
fn test_user_role_serializes_lowercase() {
    assert_eq!(serde_json::to_value(UserRole::User).unwrap(), json!("user"));
    assert_eq!(serde_json::to_value(UserRole::Admin).unwrap(), json!("admin"));
    assert_eq!(UserRole::default(), UserRole::User);
}

#[test]
fn test_register_request_parses_naive_birthdate() {
    let req: RegisterUserRequest = serde_json::from_value(json!({
        "username": "u",
        "name": "N",
        "birthdate": "2000-01-01T00:00:00",
        "password": "validPassword123",
    }))
    .unwrap();

    assert_eq!(req.birthdate, birthdate());

    let info = UserInfo::from(req);
    assert_eq!(info.role, UserRole::User);
}

#[test]
fn test_register_request_rejects_bad_date() {
    let result = serde_json::from_value::<RegisterUserRequest>(json!({
        "username": "u",
        "name": "N",
        "birthdate": "invalid-date",
        "password": "validPassword123",
    }));

    assert!(result.is_err());
}

#[test]
fn test_password_validity_boundary() {
    let short = "x".repeat(MIN_PASSWORD_LEN - 1);
    let exact = "x".repeat(MIN_PASSWORD_LEN);

    assert!(!UserInfo::new("u", "N", birthdate(), short).has_valid_password());
    assert!(UserInfo::new("u", "N", birthdate(), exact).has_valid_password());
}

#[test]
fn test_user_response_omits_password() {
    let entity = UserEntity {
        uid: 5,
        info: UserInfo::new("alice", "Alice", birthdate(), "validPassword123")
            .with_role(UserRole::Admin),
    };

    let value = serde_json::to_value(UserResponse::from(entity)).unwrap();

    assert_eq!(
        value,
        json!({
            "uid": 5,
            "username": "alice",
            "name": "Alice",
            "birthdate": "2000-01-01T00:00:00",
            "role": "admin",
        })
    );
}
