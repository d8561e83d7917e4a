//! SeaORM entity for the `cities` table.

use sea_orm::entity::prelude::*;

use crate::domain::City;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub country_id: Uuid,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for City {
    fn from(m: Model) -> Self {
        City {
            id: m.id,
            country_id: m.country_id,
            name: m.name,
        }
    }
}
