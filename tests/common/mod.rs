//! Shared test harness: a Unit of Work over mock repositories plus
//! builders for the domain records the tests exercise.

// Not every test binary uses every helper
#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use tutormarket::domain::{Actor, Role, TutorProfile, TutorStatus, User};
use tutormarket::infra::repositories::{
    ArticleRepository, CatalogRepository, CountryRepository, MockArticleRepository,
    MockCatalogRepository, MockCountryRepository, MockProfileRepository, MockRequestRepository,
    MockReviewRepository, MockThreadRepository, MockUnlockRepository, MockUserRepository,
    ProfileRepository, RequestRepository, ReviewRepository, ThreadRepository, UnlockRepository,
    UserRepository,
};
use tutormarket::infra::UnitOfWork;

/// Unit of Work whose repositories are mockall mocks. Build the mocks you
/// need expectations on, then fill the rest with `..Default::default()`;
/// an unexpected call on a default mock panics the test.
pub struct TestUnitOfWork {
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub requests: Arc<dyn RequestRepository>,
    pub unlocks: Arc<dyn UnlockRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub threads: Arc<dyn ThreadRepository>,
    pub countries: Arc<dyn CountryRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub articles: Arc<dyn ArticleRepository>,
}

impl Default for TestUnitOfWork {
    fn default() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            profiles: Arc::new(MockProfileRepository::new()),
            requests: Arc::new(MockRequestRepository::new()),
            unlocks: Arc::new(MockUnlockRepository::new()),
            reviews: Arc::new(MockReviewRepository::new()),
            threads: Arc::new(MockThreadRepository::new()),
            countries: Arc::new(MockCountryRepository::new()),
            catalog: Arc::new(MockCatalogRepository::new()),
            articles: Arc::new(MockArticleRepository::new()),
        }
    }
}

impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileRepository> {
        self.profiles.clone()
    }

    fn requests(&self) -> Arc<dyn RequestRepository> {
        self.requests.clone()
    }

    fn unlocks(&self) -> Arc<dyn UnlockRepository> {
        self.unlocks.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewRepository> {
        self.reviews.clone()
    }

    fn threads(&self) -> Arc<dyn ThreadRepository> {
        self.threads.clone()
    }

    fn countries(&self) -> Arc<dyn CountryRepository> {
        self.countries.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogRepository> {
        self.catalog.clone()
    }

    fn articles(&self) -> Arc<dyn ArticleRepository> {
        self.articles.clone()
    }
}

pub fn test_user(id: Uuid, role: Role) -> User {
    User {
        id,
        username: format!("user-{}", &id.simple().to_string()[..8]),
        email: "user@example.com".to_string(),
        password_hash: "hashed".to_string(),
        first_name: "Awa".to_string(),
        last_name: "Koné".to_string(),
        phone: "+2250700000000".to_string(),
        role,
        country_id: None,
        is_superuser: false,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_actor(id: Uuid, role: Role) -> Actor {
    Actor {
        id,
        username: "tester".to_string(),
        role,
        is_superuser: false,
    }
}

pub fn superuser_actor(id: Uuid) -> Actor {
    Actor {
        id,
        username: "root".to_string(),
        role: Role::Admin,
        is_superuser: true,
    }
}

pub fn test_tutor_profile(id: Uuid, user_id: Uuid, status: TutorStatus) -> TutorProfile {
    TutorProfile {
        id,
        user_id,
        bio: "Professeur de mathématiques".to_string(),
        photo: None,
        city_id: None,
        quartier: "Cocody".to_string(),
        cni_document: None,
        casier_document: None,
        diplomas_document: None,
        subject_ids: vec![],
        level_ids: vec![],
        is_online_class: false,
        is_home_class: true,
        status,
        admin_notes: String::new(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
        validated_at: None,
    }
}
