//! Country configuration repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::country::{self, Entity as CountryEntity};
use crate::domain::Country;
use crate::errors::{AppError, AppResult};

/// Data access for country configuration records.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CountryRepository: Send + Sync {
    async fn find(&self, id: Uuid) -> AppResult<Option<Country>>;

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Country>>;

    /// All countries, ordered by name
    async fn list(&self) -> AppResult<Vec<Country>>;

    async fn create(&self, country: Country) -> AppResult<Country>;

    /// Persist the full record (config updates, active toggles)
    async fn update(&self, country: Country) -> AppResult<Country>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed implementation
pub struct CountryStore {
    db: DatabaseConnection,
}

impl CountryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CountryRepository for CountryStore {
    async fn find(&self, id: Uuid) -> AppResult<Option<Country>> {
        let model = CountryEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Country::from))
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Country>> {
        let model = CountryEntity::find()
            .filter(country::Column::Code.eq(code))
            .one(&self.db)
            .await?;
        Ok(model.map(Country::from))
    }

    async fn list(&self) -> AppResult<Vec<Country>> {
        let models = CountryEntity::find()
            .order_by_asc(country::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Country::from).collect())
    }

    async fn create(&self, c: Country) -> AppResult<Country> {
        let model = country::ActiveModel {
            id: Set(c.id),
            name: Set(c.name),
            code: Set(c.code),
            currency_symbol: Set(c.currency_symbol),
            is_active: Set(c.is_active),
            min_budget_threshold: Set(c.min_budget_threshold),
            subscription_price: Set(c.subscription_price),
            contact_price: Set(c.contact_price),
            casier_delay_weeks: Set(c.casier_delay_weeks),
            reminder_days: Set(c.reminder_days),
            created_at: Set(c.created_at),
            updated_at: Set(c.updated_at),
        }
        .insert(&self.db)
        .await?;
        Ok(Country::from(model))
    }

    async fn update(&self, c: Country) -> AppResult<Country> {
        let model = CountryEntity::find_by_id(c.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: country::ActiveModel = model.into();
        active.name = Set(c.name);
        active.currency_symbol = Set(c.currency_symbol);
        active.is_active = Set(c.is_active);
        active.min_budget_threshold = Set(c.min_budget_threshold);
        active.subscription_price = Set(c.subscription_price);
        active.contact_price = Set(c.contact_price);
        active.casier_delay_weeks = Set(c.casier_delay_weeks);
        active.reminder_days = Set(c.reminder_days);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Country::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = CountryEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
