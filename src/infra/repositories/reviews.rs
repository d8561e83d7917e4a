//! Review repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::review::{self, Entity as ReviewEntity};
use crate::domain::Review;
use crate::errors::AppResult;

/// Data access for tutor reviews.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_by_tutor_author(
        &self,
        tutor_id: Uuid,
        author_id: Uuid,
    ) -> AppResult<Option<Review>>;

    async fn create(&self, review: Review) -> AppResult<Review>;

    /// Reviews for a tutor, newest first
    async fn list_for_tutor(&self, tutor_id: Uuid) -> AppResult<Vec<Review>>;
}

/// SeaORM-backed implementation
pub struct ReviewStore {
    db: DatabaseConnection,
}

impl ReviewStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for ReviewStore {
    async fn find_by_tutor_author(
        &self,
        tutor_id: Uuid,
        author_id: Uuid,
    ) -> AppResult<Option<Review>> {
        let model = ReviewEntity::find()
            .filter(review::Column::TutorId.eq(tutor_id))
            .filter(review::Column::AuthorId.eq(author_id))
            .one(&self.db)
            .await?;
        Ok(model.map(Review::from))
    }

    async fn create(&self, r: Review) -> AppResult<Review> {
        let model = review::ActiveModel {
            id: Set(r.id),
            tutor_id: Set(r.tutor_id),
            author_id: Set(r.author_id),
            rating: Set(r.rating),
            comment: Set(r.comment),
            created_at: Set(r.created_at),
        }
        .insert(&self.db)
        .await?;
        Ok(Review::from(model))
    }

    async fn list_for_tutor(&self, tutor_id: Uuid) -> AppResult<Vec<Review>> {
        let models = ReviewEntity::find()
            .filter(review::Column::TutorId.eq(tutor_id))
            .order_by_desc(review::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Review::from).collect())
    }
}
