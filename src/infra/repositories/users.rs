//! User repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::user::{self, Entity as UserEntity};
use crate::domain::{Role, UpdateAccount, User};
use crate::errors::{AppError, AppResult};

/// Data access for user accounts.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Batch lookup, e.g. to resolve display names for reviews
    async fn find_many(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>>;

    /// Persist a fully-built domain user
    async fn create(&self, user: User) -> AppResult<User>;

    async fn update_account(&self, id: Uuid, update: UpdateAccount) -> AppResult<User>;

    async fn set_active(&self, id: Uuid, is_active: bool) -> AppResult<User>;

    /// Hard delete. Superuser protection is enforced by the service layer.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn list_by_role(&self, role: Role, limit: u64) -> AppResult<Vec<User>>;

    /// Admin accounts, superusers first
    async fn list_staff(&self) -> AppResult<Vec<User>>;

    async fn count_by_role(&self, role: Role) -> AppResult<u64>;
}

/// SeaORM-backed implementation
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(result.map(User::from))
    }

    async fn find_many(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = UserEntity::find()
            .filter(user::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(User::from).collect())
    }

    async fn create(&self, u: User) -> AppResult<User> {
        let model = user::ActiveModel {
            id: Set(u.id),
            username: Set(u.username),
            email: Set(u.email),
            password_hash: Set(u.password_hash),
            first_name: Set(u.first_name),
            last_name: Set(u.last_name),
            phone: Set(u.phone),
            role: Set(u.role.as_str().to_string()),
            country_id: Set(u.country_id),
            is_superuser: Set(u.is_superuser),
            is_active: Set(u.is_active),
            created_at: Set(u.created_at),
            updated_at: Set(u.updated_at),
        }
        .insert(&self.db)
        .await?;

        Ok(User::from(model))
    }

    async fn update_account(&self, id: Uuid, update: UpdateAccount) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: user::ActiveModel = model.into();
        if let Some(first_name) = update.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(email) = update.email {
            active.email = Set(email);
        }
        if let Some(phone) = update.phone {
            active.phone = Set(phone);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(User::from(model))
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: user::ActiveModel = model.into();
        active.is_active = Set(is_active);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn list_by_role(&self, role: Role, limit: u64) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .filter(user::Column::Role.eq(role.as_str()))
            .order_by_desc(user::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(User::from).collect())
    }

    async fn list_staff(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .filter(
                user::Column::Role
                    .eq(Role::Admin.as_str())
                    .or(user::Column::IsSuperuser.eq(true)),
            )
            .order_by_desc(user::Column::IsSuperuser)
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(User::from).collect())
    }

    async fn count_by_role(&self, role: Role) -> AppResult<u64> {
        let count = UserEntity::find()
            .filter(user::Column::Role.eq(role.as_str()))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
