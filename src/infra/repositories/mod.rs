//! Repository layer - Data access abstraction
//!
//! One repository per aggregate, each behind a trait so services can be
//! tested against mocks. Stores translate between SeaORM models and
//! domain types.

pub(crate) mod entities;

mod articles;
mod catalog;
mod countries;
mod profiles;
mod requests;
mod reviews;
mod threads;
mod unlocks;
mod users;

pub use articles::{ArticleRepository, ArticleStore};
pub use catalog::{CatalogRepository, CatalogStore};
pub use countries::{CountryRepository, CountryStore};
pub use profiles::{ProfileRepository, ProfileStore, TutorSearch};
pub use requests::{RequestRepository, RequestStore};
pub use reviews::{ReviewRepository, ReviewStore};
pub use threads::{ThreadRepository, ThreadStore};
pub use unlocks::{UnlockRepository, UnlockStore};
pub use users::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use articles::MockArticleRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use catalog::MockCatalogRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use countries::MockCountryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use profiles::MockProfileRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use requests::MockRequestRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use reviews::MockReviewRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use threads::MockThreadRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use unlocks::MockUnlockRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use users::MockUserRepository;
