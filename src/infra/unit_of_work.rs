//! Unit of Work - centralized repository access.
//!
//! Services receive one `UnitOfWork` instead of nine repository handles.
//! Handlers perform single-statement writes; the cross-record invariants
//! (one unlock per (parent, tutor), one review per (tutor, author)) are
//! backed by database unique constraints rather than explicit transactions.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    ArticleRepository, ArticleStore, CatalogRepository, CatalogStore, CountryRepository,
    CountryStore, ProfileRepository, ProfileStore, RequestRepository, RequestStore,
    ReviewRepository, ReviewStore, ThreadRepository, ThreadStore, UnlockRepository, UnlockStore,
    UserRepository, UserStore,
};

/// Accessor trait for all repositories; object-safe for test doubles.
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;
    fn profiles(&self) -> Arc<dyn ProfileRepository>;
    fn requests(&self) -> Arc<dyn RequestRepository>;
    fn unlocks(&self) -> Arc<dyn UnlockRepository>;
    fn reviews(&self) -> Arc<dyn ReviewRepository>;
    fn threads(&self) -> Arc<dyn ThreadRepository>;
    fn countries(&self) -> Arc<dyn CountryRepository>;
    fn catalog(&self) -> Arc<dyn CatalogRepository>;
    fn articles(&self) -> Arc<dyn ArticleRepository>;
}

/// Concrete implementation over one database connection
pub struct Persistence {
    users: Arc<UserStore>,
    profiles: Arc<ProfileStore>,
    requests: Arc<RequestStore>,
    unlocks: Arc<UnlockStore>,
    reviews: Arc<ReviewStore>,
    threads: Arc<ThreadStore>,
    countries: Arc<CountryStore>,
    catalog: Arc<CatalogStore>,
    articles: Arc<ArticleStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            profiles: Arc::new(ProfileStore::new(db.clone())),
            requests: Arc::new(RequestStore::new(db.clone())),
            unlocks: Arc::new(UnlockStore::new(db.clone())),
            reviews: Arc::new(ReviewStore::new(db.clone())),
            threads: Arc::new(ThreadStore::new(db.clone())),
            countries: Arc::new(CountryStore::new(db.clone())),
            catalog: Arc::new(CatalogStore::new(db.clone())),
            articles: Arc::new(ArticleStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
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
