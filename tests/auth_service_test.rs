//! Auth service tests: public/back-office login split and registration.

mod common;

use std::sync::Arc;

use uuid::Uuid;

use tutormarket::config::Config;
use tutormarket::domain::{Password, Role};
use tutormarket::errors::AppError;
use tutormarket::infra::repositories::MockUserRepository;
use tutormarket::services::{AuthService, Authenticator, Registration};

use common::{test_user, TestUnitOfWork};

fn registration(role: Role) -> Registration {
    Registration {
        username: "awa.kone".to_string(),
        email: "awa@example.com".to_string(),
        password: "SecurePass123!".to_string(),
        phone: String::new(),
        role,
        country_id: None,
    }
}

fn service_with_users(users: MockUserRepository) -> Authenticator<TestUnitOfWork> {
    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..Default::default()
    };
    Authenticator::new(Arc::new(uow), Config::for_tests())
}

#[tokio::test]
async fn registration_rejects_the_admin_role() {
    let service = service_with_users(MockUserRepository::new());

    let result = service.register(registration(Role::Admin)).await;
    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn registration_rejects_taken_usernames() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .returning(|_| Ok(Some(test_user(Uuid::new_v4(), Role::Parent))));

    let service = service_with_users(users);

    let result = service.register(registration(Role::Parent)).await;
    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn registration_creates_a_parent_account() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    users.expect_create().returning(|user| Ok(user));

    let service = service_with_users(users);

    let user = service.register(registration(Role::Parent)).await.unwrap();
    assert_eq!(user.role, Role::Parent);
    assert!(!user.is_superuser);
    // The stored hash verifies the original password
    assert!(Password::from_hash(user.password_hash.clone()).verify("SecurePass123!"));
}

#[tokio::test]
async fn public_login_rejects_staff_accounts() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| {
        let mut user = test_user(Uuid::new_v4(), Role::Admin);
        user.password_hash = Password::new("SecurePass123!").unwrap().into_string();
        Ok(Some(user))
    });

    let service = service_with_users(users);

    let result = service
        .login("admin".to_string(), "SecurePass123!".to_string())
        .await;
    assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
}

#[tokio::test]
async fn public_login_issues_a_token_for_parents() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| {
        let mut user = test_user(Uuid::new_v4(), Role::Parent);
        user.password_hash = Password::new("SecurePass123!").unwrap().into_string();
        Ok(Some(user))
    });

    let service = service_with_users(users);

    let token = service
        .login("awa.kone".to_string(), "SecurePass123!".to_string())
        .await
        .unwrap();

    assert_eq!(token.token_type, "Bearer");
    let claims = service.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.role, "parent");
}

#[tokio::test]
async fn wrong_password_is_invalid_credentials() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| {
        let mut user = test_user(Uuid::new_v4(), Role::Parent);
        user.password_hash = Password::new("SecurePass123!").unwrap().into_string();
        Ok(Some(user))
    });

    let service = service_with_users(users);

    let result = service
        .login("awa.kone".to_string(), "WrongPass123!".to_string())
        .await;
    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn unknown_users_are_invalid_credentials_too() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));

    let service = service_with_users(users);

    let result = service
        .login("ghost".to_string(), "SecurePass123!".to_string())
        .await;
    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn back_office_login_rejects_regular_accounts() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| {
        let mut user = test_user(Uuid::new_v4(), Role::Parent);
        user.password_hash = Password::new("SecurePass123!").unwrap().into_string();
        Ok(Some(user))
    });

    let service = service_with_users(users);

    let result = service
        .admin_login("awa.kone".to_string(), "SecurePass123!".to_string())
        .await;
    assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
}

#[tokio::test]
async fn deactivated_accounts_cannot_log_in() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| {
        let mut user = test_user(Uuid::new_v4(), Role::Parent);
        user.password_hash = Password::new("SecurePass123!").unwrap().into_string();
        user.is_active = false;
        Ok(Some(user))
    });

    let service = service_with_users(users);

    let result = service
        .login("awa.kone".to_string(), "SecurePass123!".to_string())
        .await;
    assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
}
