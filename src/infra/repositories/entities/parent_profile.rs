//! SeaORM entity for the `parent_profiles` table.

use sea_orm::entity::prelude::*;

use crate::domain::ParentProfile;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parent_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub is_phone_verified: bool,
    pub address: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ParentProfile {
    fn from(m: Model) -> Self {
        ParentProfile {
            id: m.id,
            user_id: m.user_id,
            is_phone_verified: m.is_phone_verified,
            address: m.address,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
