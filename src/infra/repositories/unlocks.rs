//! Contact-unlock repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::contact_unlock::{self, Entity as UnlockEntity};
use crate::domain::ContactUnlock;
use crate::errors::AppResult;

/// Data access for contact unlocks.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UnlockRepository: Send + Sync {
    async fn find(&self, parent_id: Uuid, tutor_id: Uuid) -> AppResult<Option<ContactUnlock>>;

    /// Insert a new unlock. The unique (parent, tutor) index rejects
    /// concurrent duplicates.
    async fn create(&self, unlock: ContactUnlock) -> AppResult<ContactUnlock>;

    async fn list_by_parent(&self, parent_id: Uuid) -> AppResult<Vec<ContactUnlock>>;
}

/// SeaORM-backed implementation
pub struct UnlockStore {
    db: DatabaseConnection,
}

impl UnlockStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UnlockRepository for UnlockStore {
    async fn find(&self, parent_id: Uuid, tutor_id: Uuid) -> AppResult<Option<ContactUnlock>> {
        let model = UnlockEntity::find()
            .filter(contact_unlock::Column::ParentId.eq(parent_id))
            .filter(contact_unlock::Column::TutorId.eq(tutor_id))
            .one(&self.db)
            .await?;
        Ok(model.map(ContactUnlock::from))
    }

    async fn create(&self, unlock: ContactUnlock) -> AppResult<ContactUnlock> {
        let model = contact_unlock::ActiveModel {
            id: Set(unlock.id),
            parent_id: Set(unlock.parent_id),
            tutor_id: Set(unlock.tutor_id),
            amount_paid: Set(unlock.amount_paid),
            created_at: Set(unlock.created_at),
        }
        .insert(&self.db)
        .await?;
        Ok(ContactUnlock::from(model))
    }

    async fn list_by_parent(&self, parent_id: Uuid) -> AppResult<Vec<ContactUnlock>> {
        let models = UnlockEntity::find()
            .filter(contact_unlock::Column::ParentId.eq(parent_id))
            .order_by_desc(contact_unlock::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(ContactUnlock::from).collect())
    }
}
