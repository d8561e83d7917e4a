//! SeaORM entity for the `articles` table.

use sea_orm::entity::prelude::*;

use crate::domain::Article;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub image: Option<String>,
    pub excerpt: String,
    pub content: String,
    pub is_published: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Article {
    fn from(m: Model) -> Self {
        Article {
            id: m.id,
            title: m.title,
            slug: m.slug,
            author_id: m.author_id,
            category_id: m.category_id,
            image: m.image,
            excerpt: m.excerpt,
            content: m.content,
            is_published: m.is_published,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
