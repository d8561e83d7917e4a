//! Back-office tests: tutor moderation and protected deletions.

mod common;

use std::sync::Arc;

use uuid::Uuid;

use tutormarket::domain::{Role, TutorStatus};
use tutormarket::errors::AppError;
use tutormarket::infra::repositories::{MockProfileRepository, MockUserRepository};
use tutormarket::services::{AdminService, BackOffice, ModerationDecision};

use common::{superuser_actor, test_actor, test_tutor_profile, test_user, TestUnitOfWork};

#[tokio::test]
async fn validate_stamps_the_profile() {
    let tutor_id = Uuid::new_v4();

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_tutor()
        .returning(|id| Ok(Some(test_tutor_profile(id, Uuid::new_v4(), TutorStatus::Pending))));
    profiles
        .expect_set_tutor_status()
        .times(1)
        .withf(|_, status, notes, validated_at| {
            *status == TutorStatus::Validated && notes.is_none() && validated_at.is_some()
        })
        .returning(|id, _, _, _| {
            Ok(test_tutor_profile(id, Uuid::new_v4(), TutorStatus::Validated))
        });

    let uow = TestUnitOfWork {
        profiles: Arc::new(profiles),
        ..Default::default()
    };
    let service = BackOffice::new(Arc::new(uow));

    let updated = service
        .moderate_tutor(tutor_id, ModerationDecision::Validate)
        .await
        .unwrap();
    assert_eq!(updated.status, TutorStatus::Validated);
}

#[tokio::test]
async fn rejection_requires_a_note() {
    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_tutor()
        .returning(|id| Ok(Some(test_tutor_profile(id, Uuid::new_v4(), TutorStatus::Pending))));

    let uow = TestUnitOfWork {
        profiles: Arc::new(profiles),
        ..Default::default()
    };
    let service = BackOffice::new(Arc::new(uow));

    let result = service
        .moderate_tutor(
            Uuid::new_v4(),
            ModerationDecision::Reject {
                note: "   ".to_string(),
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn rejection_stores_the_note() {
    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_tutor()
        .returning(|id| Ok(Some(test_tutor_profile(id, Uuid::new_v4(), TutorStatus::Pending))));
    profiles
        .expect_set_tutor_status()
        .withf(|_, status, notes, validated_at| {
            *status == TutorStatus::Rejected
                && notes.as_deref() == Some("Documents illisibles")
                && validated_at.is_none()
        })
        .returning(|id, _, _, _| {
            Ok(test_tutor_profile(id, Uuid::new_v4(), TutorStatus::Rejected))
        });

    let uow = TestUnitOfWork {
        profiles: Arc::new(profiles),
        ..Default::default()
    };
    let service = BackOffice::new(Arc::new(uow));

    let updated = service
        .moderate_tutor(
            Uuid::new_v4(),
            ModerationDecision::Reject {
                note: "Documents illisibles".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, TutorStatus::Rejected);
}

#[tokio::test]
async fn moderation_only_applies_to_pending_profiles() {
    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_tutor()
        .returning(|id| Ok(Some(test_tutor_profile(id, Uuid::new_v4(), TutorStatus::Draft))));

    let uow = TestUnitOfWork {
        profiles: Arc::new(profiles),
        ..Default::default()
    };
    let service = BackOffice::new(Arc::new(uow));

    let result = service
        .moderate_tutor(Uuid::new_v4(), ModerationDecision::Validate)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn suspension_only_applies_to_validated_profiles() {
    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_tutor()
        .returning(|id| Ok(Some(test_tutor_profile(id, Uuid::new_v4(), TutorStatus::Pending))));

    let uow = TestUnitOfWork {
        profiles: Arc::new(profiles),
        ..Default::default()
    };
    let service = BackOffice::new(Arc::new(uow));

    let result = service.suspend_tutor(Uuid::new_v4()).await;
    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn superusers_cannot_be_deleted() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|id| {
        let mut user = test_user(id, Role::Admin);
        user.is_superuser = true;
        Ok(Some(user))
    });
    // expect_delete absent: the protected account must never reach it

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..Default::default()
    };
    let service = BackOffice::new(Arc::new(uow));

    let actor = superuser_actor(Uuid::new_v4());
    let result = service.delete_user(&actor, Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
}

#[tokio::test]
async fn admins_cannot_delete_themselves() {
    let actor_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id, Role::Parent))));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..Default::default()
    };
    let service = BackOffice::new(Arc::new(uow));

    let actor = superuser_actor(actor_id);
    let result = service.delete_user(&actor, actor_id).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
}

#[tokio::test]
async fn deletion_is_superuser_only() {
    let service = BackOffice::new(Arc::new(TestUnitOfWork::default()));

    let actor = test_actor(Uuid::new_v4(), Role::Admin);
    let result = service.delete_user(&actor, Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
}

#[tokio::test]
async fn regular_accounts_can_be_deleted() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id, Role::Parent))));
    users.expect_delete().times(1).returning(|_| Ok(()));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..Default::default()
    };
    let service = BackOffice::new(Arc::new(uow));

    let actor = superuser_actor(Uuid::new_v4());
    assert!(service.delete_user(&actor, Uuid::new_v4()).await.is_ok());
}
