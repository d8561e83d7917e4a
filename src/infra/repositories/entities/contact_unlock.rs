//! SeaORM entity for the `contact_unlocks` table.
//!
//! A unique index on (parent_id, tutor_id) is the backstop against two
//! concurrent purchases creating duplicate charges.

use sea_orm::entity::prelude::*;

use crate::domain::ContactUnlock;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "contact_unlocks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub parent_id: Uuid,
    pub tutor_id: Uuid,
    pub amount_paid: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ContactUnlock {
    fn from(m: Model) -> Self {
        ContactUnlock {
            id: m.id,
            parent_id: m.parent_id,
            tutor_id: m.tutor_id,
            amount_paid: m.amount_paid,
            created_at: m.created_at,
        }
    }
}
