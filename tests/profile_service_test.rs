//! Profile service tests: lazy creation and the submit state machine.

mod common;

use std::sync::Arc;

use uuid::Uuid;

use tutormarket::domain::{Role, TutorProfileUpdate, TutorStatus};
use tutormarket::infra::repositories::{MockProfileRepository, MockRequestRepository};
use tutormarket::services::{Dashboard, ProfileService, Profiles};

use common::{test_actor, test_tutor_profile, TestUnitOfWork};

fn empty_tutor_update() -> TutorProfileUpdate {
    TutorProfileUpdate {
        bio: None,
        photo: None,
        city_id: None,
        quartier: None,
        cni_document: None,
        casier_document: None,
        diplomas_document: None,
        subject_ids: None,
        level_ids: None,
        is_online_class: None,
        is_home_class: None,
    }
}

#[tokio::test]
async fn first_dashboard_visit_creates_the_tutor_profile() {
    let user_id = Uuid::new_v4();

    let mut profiles = MockProfileRepository::new();
    profiles.expect_find_tutor_by_user().returning(|_| Ok(None));
    profiles
        .expect_create_tutor()
        .times(1)
        .returning(|user_id| Ok(test_tutor_profile(Uuid::new_v4(), user_id, TutorStatus::Draft)));

    let uow = TestUnitOfWork {
        profiles: Arc::new(profiles),
        ..Default::default()
    };
    let service = Profiles::new(Arc::new(uow));

    let actor = test_actor(user_id, Role::Tutor);
    let dashboard = service.dashboard(&actor).await.unwrap();

    match dashboard {
        Dashboard::Tutor { profile } => assert_eq!(profile.status, TutorStatus::Draft),
        other => panic!("expected tutor dashboard, got {:?}", std::mem::discriminant(&other)),
    }
}

#[tokio::test]
async fn saving_a_draft_profile_queues_it_for_moderation() {
    let user_id = Uuid::new_v4();

    let mut profiles = MockProfileRepository::new();
    profiles.expect_find_tutor_by_user().returning(move |uid| {
        Ok(Some(test_tutor_profile(Uuid::new_v4(), uid, TutorStatus::Draft)))
    });
    profiles
        .expect_update_tutor()
        .withf(|profile| profile.status == TutorStatus::Pending)
        .returning(|profile| Ok(profile));

    let uow = TestUnitOfWork {
        profiles: Arc::new(profiles),
        ..Default::default()
    };
    let service = Profiles::new(Arc::new(uow));

    let actor = test_actor(user_id, Role::Tutor);
    let updated = service
        .update_tutor_profile(
            &actor,
            TutorProfileUpdate {
                bio: Some("Nouveau CV".to_string()),
                ..empty_tutor_update()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, TutorStatus::Pending);
    assert_eq!(updated.bio, "Nouveau CV");
}

#[tokio::test]
async fn rejected_resubmission_reenters_the_queue() {
    let mut profiles = MockProfileRepository::new();
    profiles.expect_find_tutor_by_user().returning(|uid| {
        Ok(Some(test_tutor_profile(Uuid::new_v4(), uid, TutorStatus::Rejected)))
    });
    profiles
        .expect_update_tutor()
        .withf(|profile| profile.status == TutorStatus::Pending)
        .returning(|profile| Ok(profile));

    let uow = TestUnitOfWork {
        profiles: Arc::new(profiles),
        ..Default::default()
    };
    let service = Profiles::new(Arc::new(uow));

    let actor = test_actor(Uuid::new_v4(), Role::Tutor);
    let updated = service
        .update_tutor_profile(&actor, empty_tutor_update())
        .await
        .unwrap();

    assert_eq!(updated.status, TutorStatus::Pending);
}

#[tokio::test]
async fn validated_profiles_keep_their_status_on_save() {
    let mut profiles = MockProfileRepository::new();
    profiles.expect_find_tutor_by_user().returning(|uid| {
        Ok(Some(test_tutor_profile(Uuid::new_v4(), uid, TutorStatus::Validated)))
    });
    profiles
        .expect_update_tutor()
        .withf(|profile| profile.status == TutorStatus::Validated)
        .returning(|profile| Ok(profile));

    let uow = TestUnitOfWork {
        profiles: Arc::new(profiles),
        ..Default::default()
    };
    let service = Profiles::new(Arc::new(uow));

    let actor = test_actor(Uuid::new_v4(), Role::Tutor);
    let updated = service
        .update_tutor_profile(&actor, empty_tutor_update())
        .await
        .unwrap();

    assert_eq!(updated.status, TutorStatus::Validated);
}

#[tokio::test]
async fn parent_dashboard_lists_their_requests() {
    let user_id = Uuid::new_v4();

    let mut profiles = MockProfileRepository::new();
    profiles.expect_find_parent_by_user().returning(|uid| {
        Ok(Some(tutormarket::domain::ParentProfile {
            id: Uuid::new_v4(),
            user_id: uid,
            is_phone_verified: false,
            address: String::new(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }))
    });

    let mut requests = MockRequestRepository::new();
    requests.expect_list_by_parent().returning(|_| Ok(vec![]));

    let uow = TestUnitOfWork {
        profiles: Arc::new(profiles),
        requests: Arc::new(requests),
        ..Default::default()
    };
    let service = Profiles::new(Arc::new(uow));

    let actor = test_actor(user_id, Role::Parent);
    let dashboard = service.dashboard(&actor).await.unwrap();

    assert!(matches!(dashboard, Dashboard::Parent { .. }));
}

#[tokio::test]
async fn parents_cannot_edit_a_tutor_profile() {
    let service = Profiles::new(Arc::new(TestUnitOfWork::default()));

    let actor = test_actor(Uuid::new_v4(), Role::Parent);
    let result = service
        .update_tutor_profile(&actor, empty_tutor_update())
        .await;

    assert!(result.is_err());
}
