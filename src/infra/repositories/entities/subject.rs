//! SeaORM entity for the `subjects` table.

use sea_orm::entity::prelude::*;

use crate::domain::Subject;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub is_academic: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Subject {
    fn from(m: Model) -> Self {
        Subject {
            id: m.id,
            name: m.name,
            is_academic: m.is_academic,
        }
    }
}
