//! Infrastructure layer - External systems integration
//!
//! Database connection, SeaORM repositories behind the Unit of Work, and
//! the Redis cache backing rate limiting.

pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use repositories::{
    ArticleRepository, CatalogRepository, CountryRepository, ProfileRepository, RequestRepository,
    ReviewRepository, ThreadRepository, TutorSearch, UnlockRepository, UserRepository,
};
pub use unit_of_work::{Persistence, UnitOfWork};
