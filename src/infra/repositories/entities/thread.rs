//! SeaORM entity for the `threads` table.

use sea_orm::entity::prelude::*;

use crate::domain::Thread;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "threads")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub created_at: DateTimeUtc,
    /// Bumped on every posted message; inbox sorts on this
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Thread {
    fn from(m: Model) -> Self {
        Thread {
            id: m.id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
