//! SeaORM entity for the `reviews` table.
//!
//! Unique on (tutor_id, author_id): one review per parent per tutor.

use sea_orm::entity::prelude::*;

use crate::domain::Review;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tutor_id: Uuid,
    pub author_id: Uuid,
    pub rating: i16,
    pub comment: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Review {
    fn from(m: Model) -> Self {
        Review {
            id: m.id,
            tutor_id: m.tutor_id,
            author_id: m.author_id,
            rating: m.rating,
            comment: m.comment,
            created_at: m.created_at,
        }
    }
}
