//! Teaching catalog repository (subjects, levels, cities).

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::city::{self, Entity as CityEntity};
use super::entities::level::{self, Entity as LevelEntity};
use super::entities::subject::{self, Entity as SubjectEntity};
use crate::domain::{City, Level, Subject};
use crate::errors::AppResult;

/// Data access for the teaching catalog. Mostly read-only at runtime;
/// the write methods exist for the seed command.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Subjects, alphabetical
    async fn subjects(&self) -> AppResult<Vec<Subject>>;

    /// Levels in school order (CP before CE1)
    async fn levels(&self) -> AppResult<Vec<Level>>;

    async fn cities(&self) -> AppResult<Vec<City>>;

    async fn find_city(&self, id: Uuid) -> AppResult<Option<City>>;

    async fn insert_subject(&self, subject: Subject) -> AppResult<Subject>;

    async fn insert_level(&self, level: Level) -> AppResult<Level>;

    async fn insert_city(&self, new_city: City) -> AppResult<City>;

    async fn find_subject_by_name(&self, name: &str) -> AppResult<Option<Subject>>;
}

/// SeaORM-backed implementation
pub struct CatalogStore {
    db: DatabaseConnection,
}

impl CatalogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for CatalogStore {
    async fn subjects(&self) -> AppResult<Vec<Subject>> {
        let models = SubjectEntity::find()
            .order_by_asc(subject::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Subject::from).collect())
    }

    async fn levels(&self) -> AppResult<Vec<Level>> {
        let models = LevelEntity::find()
            .order_by_asc(level::Column::SortOrder)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Level::from).collect())
    }

    async fn cities(&self) -> AppResult<Vec<City>> {
        let models = CityEntity::find()
            .order_by_asc(city::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(City::from).collect())
    }

    async fn find_city(&self, id: Uuid) -> AppResult<Option<City>> {
        let model = CityEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(City::from))
    }

    async fn insert_subject(&self, s: Subject) -> AppResult<Subject> {
        let model = subject::ActiveModel {
            id: Set(s.id),
            name: Set(s.name),
            is_academic: Set(s.is_academic),
        }
        .insert(&self.db)
        .await?;
        Ok(Subject::from(model))
    }

    async fn insert_level(&self, l: Level) -> AppResult<Level> {
        let model = level::ActiveModel {
            id: Set(l.id),
            name: Set(l.name),
            category: Set(l.category.as_str().to_string()),
            sort_order: Set(l.sort_order),
        }
        .insert(&self.db)
        .await?;
        Ok(Level::from(model))
    }

    async fn insert_city(&self, c: City) -> AppResult<City> {
        let model = city::ActiveModel {
            id: Set(c.id),
            country_id: Set(c.country_id),
            name: Set(c.name),
        }
        .insert(&self.db)
        .await?;
        Ok(City::from(model))
    }

    async fn find_subject_by_name(&self, name: &str) -> AppResult<Option<Subject>> {
        let model = SubjectEntity::find()
            .filter(subject::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(Subject::from))
    }
}
