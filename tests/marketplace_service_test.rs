//! Marketplace service tests: scoring at creation, reactivation on edit,
//! the contact paywall, and review gating.

mod common;

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use tutormarket::domain::{
    BudgetRange, ContactUnlock, CourseRequest, CourseRequestUpdate, Intention, NewCourseRequest,
    Qualification, RequestStatus, Review, Role, StartTime, TutorStatus,
};
use tutormarket::errors::AppError;
use tutormarket::infra::repositories::{
    MockCatalogRepository, MockProfileRepository, MockRequestRepository, MockReviewRepository,
    MockUnlockRepository, MockUserRepository,
};
use tutormarket::infra::TutorSearch;
use tutormarket::services::{Marketplace, MarketplaceService};

use common::{test_actor, test_tutor_profile, test_user, TestUnitOfWork};

fn new_request(budget: BudgetRange, start: StartTime, intention: Intention) -> NewCourseRequest {
    NewCourseRequest {
        subject_ids: vec![Uuid::new_v4()],
        level_id: None,
        city_id: None,
        quartier: "Marcory".to_string(),
        frequency: "2x par semaine".to_string(),
        is_online: false,
        budget_range: budget,
        start_time: start,
        intention,
        description: String::new(),
    }
}

fn users_echo() -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id, Role::Parent))));
    users
}

fn requests_echo() -> MockRequestRepository {
    let mut requests = MockRequestRepository::new();
    requests.expect_create().returning(|req| Ok(req));
    requests
}

#[tokio::test]
async fn creation_scores_the_lead_once() {
    let uow = TestUnitOfWork {
        users: Arc::new(users_echo()),
        requests: Arc::new(requests_echo()),
        ..Default::default()
    };
    let service = Marketplace::new(Arc::new(uow));
    let actor = test_actor(Uuid::new_v4(), Role::Parent);

    let created = service
        .create_request(
            &actor,
            new_request(BudgetRange::Standard, StartTime::Asap, Intention::Start),
        )
        .await
        .unwrap();

    assert_eq!(created.qualification, Qualification::Strong);
    assert_eq!(created.qualification.label(), "Intention Forte");
    assert_eq!(created.status, RequestStatus::Active);
}

#[tokio::test]
async fn low_budget_fails_the_gate_despite_urgency() {
    let uow = TestUnitOfWork {
        users: Arc::new(users_echo()),
        requests: Arc::new(requests_echo()),
        ..Default::default()
    };
    let service = Marketplace::new(Arc::new(uow));
    let actor = test_actor(Uuid::new_v4(), Role::Parent);

    let created = service
        .create_request(
            &actor,
            new_request(BudgetRange::Low, StartTime::Asap, Intention::Start),
        )
        .await
        .unwrap();

    assert_eq!(created.qualification, Qualification::LimitedBudget);
    assert_eq!(created.qualification.label(), "Budget Limité / Autre");
}

#[tokio::test]
async fn tutors_cannot_post_requests() {
    let service = Marketplace::new(Arc::new(TestUnitOfWork::default()));
    let actor = test_actor(Uuid::new_v4(), Role::Tutor);

    let result = service
        .create_request(
            &actor,
            new_request(BudgetRange::Standard, StartTime::Asap, Intention::Start),
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
}

#[tokio::test]
async fn editing_reactivates_without_rescoring() {
    let parent_id = Uuid::new_v4();

    let mut requests = MockRequestRepository::new();
    requests.expect_find().returning(move |id| {
        Ok(Some(CourseRequest {
            id,
            parent_id,
            subject_ids: vec![Uuid::new_v4()],
            level_id: None,
            city_id: None,
            quartier: "Cocody".to_string(),
            frequency: "1x par semaine".to_string(),
            is_online: false,
            budget_range: BudgetRange::High,
            start_time: StartTime::Asap,
            intention: Intention::Start,
            description: String::new(),
            qualification: Qualification::Strong,
            status: RequestStatus::Expired,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }))
    });
    requests.expect_update().returning(|req| Ok(req));

    let uow = TestUnitOfWork {
        requests: Arc::new(requests),
        ..Default::default()
    };
    let service = Marketplace::new(Arc::new(uow));
    let actor = test_actor(parent_id, Role::Parent);

    let updated = service
        .update_request(
            &actor,
            Uuid::new_v4(),
            CourseRequestUpdate {
                budget_range: Some(BudgetRange::Low),
                ..empty_update()
            },
        )
        .await
        .unwrap();

    // Reactivated, budget changed, but the label stays as scored at creation
    assert_eq!(updated.status, RequestStatus::Active);
    assert_eq!(updated.budget_range, BudgetRange::Low);
    assert_eq!(updated.qualification, Qualification::Strong);
}

fn empty_update() -> CourseRequestUpdate {
    CourseRequestUpdate {
        subject_ids: None,
        level_id: None,
        city_id: None,
        quartier: None,
        frequency: None,
        is_online: None,
        budget_range: None,
        start_time: None,
        intention: None,
        description: None,
    }
}

#[tokio::test]
async fn only_the_owner_can_edit() {
    let mut requests = MockRequestRepository::new();
    requests.expect_find().returning(|id| {
        Ok(Some(CourseRequest {
            id,
            parent_id: Uuid::new_v4(),
            subject_ids: vec![Uuid::new_v4()],
            level_id: None,
            city_id: None,
            quartier: String::new(),
            frequency: String::new(),
            is_online: false,
            budget_range: BudgetRange::Standard,
            start_time: StartTime::Later,
            intention: Intention::Info,
            description: String::new(),
            qualification: Qualification::Warm,
            status: RequestStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }))
    });

    let uow = TestUnitOfWork {
        requests: Arc::new(requests),
        ..Default::default()
    };
    let service = Marketplace::new(Arc::new(uow));
    let actor = test_actor(Uuid::new_v4(), Role::Parent);

    let result = service
        .update_request(&actor, Uuid::new_v4(), empty_update())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
}

#[tokio::test]
async fn request_feed_is_reserved_for_tutors() {
    let service = Marketplace::new(Arc::new(TestUnitOfWork::default()));
    let actor = test_actor(Uuid::new_v4(), Role::Parent);

    let result = service.browse_requests(&actor, None).await;
    assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
}

fn empty_catalog() -> MockCatalogRepository {
    let mut catalog = MockCatalogRepository::new();
    catalog.expect_subjects().returning(|| Ok(vec![]));
    catalog.expect_levels().returning(|| Ok(vec![]));
    catalog.expect_cities().returning(|| Ok(vec![]));
    catalog
}

#[tokio::test]
async fn contact_is_masked_for_anonymous_viewers() {
    let tutor_user_id = Uuid::new_v4();

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_tutor()
        .returning(move |id| Ok(Some(test_tutor_profile(id, tutor_user_id, TutorStatus::Validated))));

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id, Role::Tutor))));
    users.expect_find_many().returning(move |ids| {
        Ok(ids
            .into_iter()
            .map(|id| test_user(id, Role::Tutor))
            .collect())
    });

    let mut reviews = MockReviewRepository::new();
    reviews.expect_list_for_tutor().returning(|_| Ok(vec![]));

    let uow = TestUnitOfWork {
        profiles: Arc::new(profiles),
        users: Arc::new(users),
        reviews: Arc::new(reviews),
        catalog: Arc::new(empty_catalog()),
        ..Default::default()
    };
    let service = Marketplace::new(Arc::new(uow));

    let detail = service.tutor_detail(Uuid::new_v4(), None).await.unwrap();

    assert!(!detail.is_unlocked);
    assert!(detail.contact.is_none());
}

#[tokio::test]
async fn contact_is_revealed_after_an_unlock() {
    let tutor_user_id = Uuid::new_v4();
    let parent_id = Uuid::new_v4();
    let tutor_id = Uuid::new_v4();

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_tutor()
        .returning(move |id| Ok(Some(test_tutor_profile(id, tutor_user_id, TutorStatus::Validated))));

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id, Role::Tutor))));
    users.expect_find_many().returning(move |ids| {
        Ok(ids
            .into_iter()
            .map(|id| test_user(id, Role::Tutor))
            .collect())
    });

    let mut reviews = MockReviewRepository::new();
    reviews.expect_list_for_tutor().returning(|_| Ok(vec![]));

    let mut unlocks = MockUnlockRepository::new();
    unlocks.expect_find().returning(|parent_id, tutor_id| {
        Ok(Some(ContactUnlock {
            id: Uuid::new_v4(),
            parent_id,
            tutor_id,
            amount_paid: 2_000,
            created_at: Utc::now(),
        }))
    });

    let uow = TestUnitOfWork {
        profiles: Arc::new(profiles),
        users: Arc::new(users),
        reviews: Arc::new(reviews),
        unlocks: Arc::new(unlocks),
        catalog: Arc::new(empty_catalog()),
        ..Default::default()
    };
    let service = Marketplace::new(Arc::new(uow));

    let viewer = test_actor(parent_id, Role::Parent);
    let detail = service.tutor_detail(tutor_id, Some(&viewer)).await.unwrap();

    assert!(detail.is_unlocked);
    let contact = detail.contact.expect("contact must be revealed");
    assert!(!contact.phone.is_empty());
}

#[tokio::test]
async fn non_validated_tutors_are_unreachable() {
    for status in [
        TutorStatus::Draft,
        TutorStatus::Pending,
        TutorStatus::Rejected,
        TutorStatus::Suspended,
    ] {
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_tutor()
            .returning(move |id| Ok(Some(test_tutor_profile(id, Uuid::new_v4(), status))));

        let uow = TestUnitOfWork {
            profiles: Arc::new(profiles),
            ..Default::default()
        };
        let service = Marketplace::new(Arc::new(uow));

        let result = service.tutor_detail(Uuid::new_v4(), None).await;
        assert!(
            matches!(result.unwrap_err(), AppError::NotFound),
            "status {:?} must 404",
            status
        );
    }
}

#[tokio::test]
async fn reviews_require_an_unlock() {
    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_tutor()
        .returning(|id| Ok(Some(test_tutor_profile(id, Uuid::new_v4(), TutorStatus::Validated))));

    let mut unlocks = MockUnlockRepository::new();
    unlocks.expect_find().returning(|_, _| Ok(None));

    let uow = TestUnitOfWork {
        profiles: Arc::new(profiles),
        unlocks: Arc::new(unlocks),
        ..Default::default()
    };
    let service = Marketplace::new(Arc::new(uow));

    let actor = test_actor(Uuid::new_v4(), Role::Parent);
    let result = service
        .submit_review(&actor, Uuid::new_v4(), 5, "Excellent".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
}

#[tokio::test]
async fn one_review_per_tutor_and_author() {
    let actor_id = Uuid::new_v4();

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_tutor()
        .returning(|id| Ok(Some(test_tutor_profile(id, Uuid::new_v4(), TutorStatus::Validated))));

    let mut unlocks = MockUnlockRepository::new();
    unlocks.expect_find().returning(|parent_id, tutor_id| {
        Ok(Some(ContactUnlock {
            id: Uuid::new_v4(),
            parent_id,
            tutor_id,
            amount_paid: 2_000,
            created_at: Utc::now(),
        }))
    });

    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_find_by_tutor_author()
        .returning(|tutor_id, author_id| {
            Ok(Some(Review {
                id: Uuid::new_v4(),
                tutor_id,
                author_id,
                rating: 4,
                comment: String::new(),
                created_at: Utc::now(),
            }))
        });

    let uow = TestUnitOfWork {
        profiles: Arc::new(profiles),
        unlocks: Arc::new(unlocks),
        reviews: Arc::new(reviews),
        ..Default::default()
    };
    let service = Marketplace::new(Arc::new(uow));

    let actor = test_actor(actor_id, Role::Parent);
    let result = service
        .submit_review(&actor, Uuid::new_v4(), 5, "Encore mieux".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn directory_only_queries_validated_profiles() {
    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_search_validated()
        .withf(|search| *search == TutorSearch::default())
        .returning(|_| Ok(vec![]));

    let uow = TestUnitOfWork {
        profiles: Arc::new(profiles),
        catalog: Arc::new(empty_catalog()),
        users: {
            let mut users = MockUserRepository::new();
            users.expect_find_many().returning(|_| Ok(vec![]));
            Arc::new(users)
        },
        ..Default::default()
    };
    let service = Marketplace::new(Arc::new(uow));

    let cards = service.list_tutors(TutorSearch::default()).await.unwrap();
    assert!(cards.is_empty());
}
