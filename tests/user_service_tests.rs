mod common;

use std::sync::Arc;

use common::InMemoryUserRepository;
use inkwell_backend::config::JwtConfig;
use inkwell_backend::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
use inkwell_backend::model::user::UserRole;
use inkwell_backend::service::user_service::{UserService, UserServiceImpl};
use inkwell_backend::util::error::ServiceError;
use inkwell_backend::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};

fn new_service() -> (Arc<InMemoryUserRepository>, UserServiceImpl) {
    let repo = Arc::new(InMemoryUserRepository::new());
    let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(JwtConfig::default()));
    let service = UserServiceImpl::new(repo.clone(), jwt_utils);
    (repo, service)
}

fn registration(email: &str, password: &str) -> CreateUserRequest {
    CreateUserRequest {
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        email: Some(email.to_string()),
        password: Some(password.to_string()),
        username: None,
        role: None,
        is_active: None,
        age: None,
        gender: None,
        contact_number: None,
        address: None,
    }
}

fn empty_update() -> UpdateUserRequest {
    UpdateUserRequest {
        first_name: None,
        last_name: None,
        email: None,
        password: None,
        username: None,
        role: None,
        is_active: None,
        age: None,
        gender: None,
        contact_number: None,
        address: None,
    }
}

#[tokio::test]
async fn create_user_normalizes_email_and_defaults() {
    let (_repo, service) = new_service();
    let created = service
        .create_user(registration("A@X.com", "Abcdef12"))
        .await
        .unwrap();

    assert_eq!(created.email, "a@x.com");
    assert_eq!(created.username, "a");
    assert_eq!(created.role, UserRole::Editor);
    assert!(created.is_active);
    assert!(!created.id.is_empty());
}

#[tokio::test]
async fn create_user_response_never_carries_a_password() {
    let (_repo, service) = new_service();
    let created = service
        .create_user(registration("safe@example.com", "Abcdef12"))
        .await
        .unwrap();
    let json = serde_json::to_value(&created).unwrap();
    assert!(json.get("password").is_none());
    assert!(json.get("passwordHash").is_none());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict_regardless_of_case() {
    let (repo, service) = new_service();
    service
        .create_user(registration("a@x.com", "Abcdef12"))
        .await
        .unwrap();

    let err = service
        .create_user(registration("A@X.COM", "Abcdef12"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
    assert_eq!(repo.count(), 1);
}

#[tokio::test]
async fn duplicate_key_behind_a_stale_precheck_still_conflicts() {
    let (repo, service) = new_service();
    service
        .create_user(registration("race@example.com", "Abcdef12"))
        .await
        .unwrap();

    // A concurrent registration slips past the existence check; the
    // storage-level unique key is the backstop.
    repo.miss_next_email_lookup();
    let err = service
        .create_user(registration("race@example.com", "Abcdef12"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
    assert_eq!(repo.count(), 1);
}

#[tokio::test]
async fn derived_usernames_get_numeric_suffixes() {
    let (_repo, service) = new_service();
    let first = service
        .create_user(registration("dana@alpha.com", "Abcdef12"))
        .await
        .unwrap();
    let second = service
        .create_user(registration("dana@beta.com", "Abcdef12"))
        .await
        .unwrap();
    let third = service
        .create_user(registration("dana@gamma.com", "Abcdef12"))
        .await
        .unwrap();

    assert_eq!(first.username, "dana");
    assert_eq!(second.username, "dana1");
    assert_eq!(third.username, "dana2");
}

#[tokio::test]
async fn weak_passwords_are_rejected_and_nothing_is_stored() {
    let (repo, service) = new_service();
    for weak in ["abc", "alllowercase1", "ALLUPPER1", "NoDigitsHere"] {
        let err = service
            .create_user(registration("weak@example.com", weak))
            .await
            .unwrap_err();
        assert!(
            matches!(err, ServiceError::InvalidInput(_)),
            "expected validation failure for {:?}",
            weak
        );
    }
    assert_eq!(repo.count(), 0);
}

#[tokio::test]
async fn missing_required_fields_are_rejected() {
    let (_repo, service) = new_service();
    let mut request = registration("a@x.com", "Abcdef12");
    request.last_name = None;
    let err = service.create_user(request).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let (_repo, service) = new_service();
    let err = service
        .create_user(registration("not-an-email", "Abcdef12"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let (_repo, service) = new_service();
    service
        .create_user(registration("ada@example.com", "Abcdef12"))
        .await
        .unwrap();

    let unknown = service
        .login("ghost@example.com".to_string(), "Abcdef12".to_string())
        .await
        .unwrap_err();
    let wrong_password = service
        .login("ada@example.com".to_string(), "Wrong999x".to_string())
        .await
        .unwrap_err();

    match (&unknown, &wrong_password) {
        (ServiceError::Unauthorized(a), ServiceError::Unauthorized(b)) => assert_eq!(a, b),
        other => panic!("expected matching Unauthorized errors, got {:?}", other),
    }
}

#[tokio::test]
async fn deactivated_account_gets_forbidden_not_unauthorized() {
    let (_repo, service) = new_service();
    let created = service
        .create_user(registration("off@example.com", "Abcdef12"))
        .await
        .unwrap();

    let mut update = empty_update();
    update.is_active = Some(false);
    service
        .update_user(bson::oid::ObjectId::parse_str(&created.id).unwrap(), update)
        .await
        .unwrap();

    let err = service
        .login("off@example.com".to_string(), "Abcdef12".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
}

#[tokio::test]
async fn login_issues_a_token_with_identity_and_role() {
    let (_repo, service) = new_service();
    let created = service
        .create_user(registration("ada@example.com", "Abcdef12"))
        .await
        .unwrap();

    let result = service
        .login("Ada@Example.com".to_string(), "Abcdef12".to_string())
        .await
        .unwrap();
    assert_eq!(result.user.email, "ada@example.com");
    assert_eq!(result.user.role, UserRole::Editor);

    let jwt_utils = JwtTokenUtilsImpl::new(JwtConfig::default());
    let claims = jwt_utils.validate_token(&result.token).unwrap();
    assert_eq!(claims.sub, created.id);
    assert_eq!(claims.email, "ada@example.com");
    assert_eq!(claims.role, "editor");
    // 24-hour expiry window
    assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
}

#[tokio::test]
async fn login_with_missing_fields_is_bad_input() {
    let (_repo, service) = new_service();
    let err = service
        .login("".to_string(), "Abcdef12".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    let err = service
        .login("a@x.com".to_string(), "".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn update_unknown_user_is_not_found() {
    let (_repo, service) = new_service();
    let err = service
        .update_user(bson::oid::ObjectId::new(), empty_update())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn update_to_taken_email_is_a_conflict() {
    let (_repo, service) = new_service();
    service
        .create_user(registration("first@example.com", "Abcdef12"))
        .await
        .unwrap();
    let second = service
        .create_user(registration("second@example.com", "Abcdef12"))
        .await
        .unwrap();

    let mut update = empty_update();
    update.email = Some("First@Example.com".to_string());
    let err = service
        .update_user(
            bson::oid::ObjectId::parse_str(&second.id).unwrap(),
            update,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn update_password_enforces_strength() {
    let (_repo, service) = new_service();
    let created = service
        .create_user(registration("pwd@example.com", "Abcdef12"))
        .await
        .unwrap();

    let mut update = empty_update();
    update.password = Some("tooweak".to_string());
    let err = service
        .update_user(
            bson::oid::ObjectId::parse_str(&created.id).unwrap(),
            update,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    // The old password still works.
    service
        .login("pwd@example.com".to_string(), "Abcdef12".to_string())
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_unknown_user_is_not_found() {
    let (_repo, service) = new_service();
    let err = service.delete_user(bson::oid::ObjectId::new()).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn list_users_excludes_passwords() {
    let (_repo, service) = new_service();
    service
        .create_user(registration("one@example.com", "Abcdef12"))
        .await
        .unwrap();
    service
        .create_user(registration("two@example.com", "Abcdef12"))
        .await
        .unwrap();

    let users = service.list_users().await.unwrap();
    assert_eq!(users.len(), 2);
    let json = serde_json::to_value(&users).unwrap();
    for user in json.as_array().unwrap() {
        assert!(user.get("password").is_none());
    }
}
