//! SeaORM entity for the `messages` table.

use sea_orm::entity::prelude::*;

use crate::domain::Message;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub thread_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Message {
    fn from(m: Model) -> Self {
        Message {
            id: m.id,
            thread_id: m.thread_id,
            sender_id: m.sender_id,
            content: m.content,
            is_read: m.is_read,
            created_at: m.created_at,
        }
    }
}
