//! SeaORM entity for the `countries` table.

use sea_orm::entity::prelude::*;

use crate::domain::Country;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "countries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    pub currency_symbol: String,
    pub is_active: bool,
    pub min_budget_threshold: i32,
    pub subscription_price: i32,
    pub contact_price: i32,
    pub casier_delay_weeks: i32,
    pub reminder_days: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Country {
    fn from(m: Model) -> Self {
        Country {
            id: m.id,
            name: m.name,
            code: m.code,
            currency_symbol: m.currency_symbol,
            is_active: m.is_active,
            min_budget_threshold: m.min_budget_threshold,
            subscription_price: m.subscription_price,
            contact_price: m.contact_price,
            casier_delay_weeks: m.casier_delay_weeks,
            reminder_days: m.reminder_days,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
