//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20250601_000001_create_users_and_geo;
mod m20250601_000002_create_profiles;
mod m20250601_000003_create_marketplace;
mod m20250601_000004_create_messaging;
mod m20250601_000005_create_blog;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_users_and_geo::Migration),
            Box::new(m20250601_000002_create_profiles::Migration),
            Box::new(m20250601_000003_create_marketplace::Migration),
            Box::new(m20250601_000004_create_messaging::Migration),
            Box::new(m20250601_000005_create_blog::Migration),
        ]
    }
}
