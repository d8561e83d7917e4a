//! Billing service tests: unlock idempotence, role guard, pricing.

mod common;

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use tutormarket::domain::{ContactUnlock, Country, Role, TutorStatus};
use tutormarket::errors::AppError;
use tutormarket::infra::repositories::{
    MockCountryRepository, MockProfileRepository, MockUnlockRepository, MockUserRepository,
};
use tutormarket::services::{Billing, BillingService};

use common::{test_actor, test_tutor_profile, test_user, TestUnitOfWork};

fn test_unlock(parent_id: Uuid, tutor_id: Uuid, amount: i32) -> ContactUnlock {
    ContactUnlock {
        id: Uuid::new_v4(),
        parent_id,
        tutor_id,
        amount_paid: amount,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn first_purchase_creates_an_unlock() {
    let parent_id = Uuid::new_v4();
    let tutor_id = Uuid::new_v4();
    let tutor_user_id = Uuid::new_v4();

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_tutor()
        .returning(move |id| Ok(Some(test_tutor_profile(id, tutor_user_id, TutorStatus::Validated))));

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id, Role::Tutor))));

    let mut unlocks = MockUnlockRepository::new();
    unlocks.expect_find().returning(|_, _| Ok(None));
    unlocks
        .expect_create()
        .times(1)
        .returning(|unlock| Ok(unlock));

    let uow = TestUnitOfWork {
        profiles: Arc::new(profiles),
        users: Arc::new(users),
        unlocks: Arc::new(unlocks),
        ..Default::default()
    };
    let service = Billing::new(Arc::new(uow));

    let actor = test_actor(parent_id, Role::Parent);
    let result = service.unlock_contact(&actor, tutor_id).await.unwrap();

    assert!(result.newly_created);
    assert_eq!(result.tutor_id, tutor_id);
    // No country set anywhere: the platform default price applies
    assert_eq!(result.amount_paid, 2_000);
}

#[tokio::test]
async fn repeat_purchase_is_a_no_op() {
    let parent_id = Uuid::new_v4();
    let tutor_id = Uuid::new_v4();
    let existing = test_unlock(parent_id, tutor_id, 2_000);
    let existing_id = existing.id;

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_tutor()
        .returning(|id| Ok(Some(test_tutor_profile(id, Uuid::new_v4(), TutorStatus::Validated))));

    let mut unlocks = MockUnlockRepository::new();
    unlocks
        .expect_find()
        .returning(move |_, _| Ok(Some(existing.clone())));
    // expect_create deliberately absent: a second charge would panic

    let uow = TestUnitOfWork {
        profiles: Arc::new(profiles),
        unlocks: Arc::new(unlocks),
        ..Default::default()
    };
    let service = Billing::new(Arc::new(uow));

    let actor = test_actor(parent_id, Role::Parent);
    let result = service.unlock_contact(&actor, tutor_id).await.unwrap();

    assert!(!result.newly_created);
    assert_eq!(result.id, existing_id);
}

#[tokio::test]
async fn only_parents_can_unlock() {
    let service = Billing::new(Arc::new(TestUnitOfWork::default()));

    let actor = test_actor(Uuid::new_v4(), Role::Tutor);
    let result = service.unlock_contact(&actor, Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
}

#[tokio::test]
async fn hidden_tutor_cannot_be_unlocked() {
    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_tutor()
        .returning(|id| Ok(Some(test_tutor_profile(id, Uuid::new_v4(), TutorStatus::Pending))));

    let uow = TestUnitOfWork {
        profiles: Arc::new(profiles),
        ..Default::default()
    };
    let service = Billing::new(Arc::new(uow));

    let actor = test_actor(Uuid::new_v4(), Role::Parent);
    let result = service.unlock_contact(&actor, Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn price_comes_from_the_tutors_country() {
    let country_id = Uuid::new_v4();
    let tutor_user_id = Uuid::new_v4();

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_tutor()
        .returning(move |id| Ok(Some(test_tutor_profile(id, tutor_user_id, TutorStatus::Validated))));

    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(move |id| {
        let mut user = test_user(id, Role::Tutor);
        user.country_id = Some(country_id);
        Ok(Some(user))
    });

    let mut countries = MockCountryRepository::new();
    countries.expect_find().returning(|id| {
        Ok(Some(Country {
            id,
            name: "Côte d'Ivoire".to_string(),
            code: "CI".to_string(),
            currency_symbol: "F CFA".to_string(),
            is_active: true,
            min_budget_threshold: 30_000,
            subscription_price: 3_000,
            contact_price: 5_000,
            casier_delay_weeks: 4,
            reminder_days: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }))
    });

    let mut unlocks = MockUnlockRepository::new();
    unlocks.expect_find().returning(|_, _| Ok(None));
    unlocks.expect_create().returning(|unlock| Ok(unlock));

    let uow = TestUnitOfWork {
        profiles: Arc::new(profiles),
        users: Arc::new(users),
        countries: Arc::new(countries),
        unlocks: Arc::new(unlocks),
        ..Default::default()
    };
    let service = Billing::new(Arc::new(uow));

    let actor = test_actor(Uuid::new_v4(), Role::Parent);
    let result = service.unlock_contact(&actor, Uuid::new_v4()).await.unwrap();

    assert_eq!(result.amount_paid, 5_000);
}
