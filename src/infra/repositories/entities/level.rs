//! SeaORM entity for the `levels` table.

use sea_orm::entity::prelude::*;

use crate::domain::{Level, LevelCategory};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "levels")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub sort_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Level {
    fn from(m: Model) -> Self {
        Level {
            id: m.id,
            name: m.name,
            category: LevelCategory::from(m.category.as_str()),
            sort_order: m.sort_order,
        }
    }
}
