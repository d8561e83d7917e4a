//! Messaging thread repository.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::message::{self, Entity as MessageEntity};
use super::entities::thread::{self, Entity as ThreadEntity};
use super::entities::thread_participant::{self, Entity as ParticipantEntity};
use crate::domain::{Message, Thread};
use crate::errors::{AppError, AppResult};

/// Data access for two-party message threads.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ThreadRepository: Send + Sync {
    /// The existing thread containing both users, if any
    async fn find_between(&self, a: Uuid, b: Uuid) -> AppResult<Option<Thread>>;

    /// New thread with exactly these two participants
    async fn create(&self, a: Uuid, b: Uuid) -> AppResult<Thread>;

    async fn find(&self, id: Uuid) -> AppResult<Option<Thread>>;

    async fn participants(&self, thread_id: Uuid) -> AppResult<Vec<Uuid>>;

    /// A user's threads, most recently active first
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Thread>>;

    /// Messages in a thread, oldest first
    async fn messages(&self, thread_id: Uuid) -> AppResult<Vec<Message>>;

    async fn last_message(&self, thread_id: Uuid) -> AppResult<Option<Message>>;

    /// Mark everything not sent by `reader_id` as read; returns rows touched
    async fn mark_read(&self, thread_id: Uuid, reader_id: Uuid) -> AppResult<u64>;

    /// Append a message and bump the thread's activity timestamp
    async fn add_message(&self, msg: Message) -> AppResult<Message>;

    /// Unread messages addressed to the user across all their threads
    async fn unread_total(&self, user_id: Uuid) -> AppResult<u64>;

    async fn unread_in_thread(&self, thread_id: Uuid, user_id: Uuid) -> AppResult<u64>;
}

/// SeaORM-backed implementation
pub struct ThreadStore {
    db: DatabaseConnection,
}

impl ThreadStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn thread_ids_for(&self, user_id: Uuid) -> AppResult<Vec<Uuid>> {
        let rows = ParticipantEntity::find()
            .filter(thread_participant::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|r| r.thread_id).collect())
    }
}

#[async_trait]
impl ThreadRepository for ThreadStore {
    async fn find_between(&self, a: Uuid, b: Uuid) -> AppResult<Option<Thread>> {
        let a_threads: HashSet<Uuid> = self.thread_ids_for(a).await?.into_iter().collect();
        let b_threads = self.thread_ids_for(b).await?;

        let shared: Vec<Uuid> = b_threads
            .into_iter()
            .filter(|id| a_threads.contains(id))
            .collect();
        if shared.is_empty() {
            return Ok(None);
        }

        let model = ThreadEntity::find()
            .filter(thread::Column::Id.is_in(shared))
            .order_by_asc(thread::Column::CreatedAt)
            .one(&self.db)
            .await?;
        Ok(model.map(Thread::from))
    }

    async fn create(&self, a: Uuid, b: Uuid) -> AppResult<Thread> {
        let now = Utc::now();
        let model = thread::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        ParticipantEntity::insert_many([
            thread_participant::ActiveModel {
                thread_id: Set(model.id),
                user_id: Set(a),
            },
            thread_participant::ActiveModel {
                thread_id: Set(model.id),
                user_id: Set(b),
            },
        ])
        .exec(&self.db)
        .await?;

        Ok(Thread::from(model))
    }

    async fn find(&self, id: Uuid) -> AppResult<Option<Thread>> {
        let model = ThreadEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Thread::from))
    }

    async fn participants(&self, thread_id: Uuid) -> AppResult<Vec<Uuid>> {
        let rows = ParticipantEntity::find()
            .filter(thread_participant::Column::ThreadId.eq(thread_id))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|r| r.user_id).collect())
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Thread>> {
        let ids = self.thread_ids_for(user_id).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = ThreadEntity::find()
            .filter(thread::Column::Id.is_in(ids))
            .order_by_desc(thread::Column::UpdatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Thread::from).collect())
    }

    async fn messages(&self, thread_id: Uuid) -> AppResult<Vec<Message>> {
        let models = MessageEntity::find()
            .filter(message::Column::ThreadId.eq(thread_id))
            .order_by_asc(message::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Message::from).collect())
    }

    async fn last_message(&self, thread_id: Uuid) -> AppResult<Option<Message>> {
        let model = MessageEntity::find()
            .filter(message::Column::ThreadId.eq(thread_id))
            .order_by_desc(message::Column::CreatedAt)
            .one(&self.db)
            .await?;
        Ok(model.map(Message::from))
    }

    async fn mark_read(&self, thread_id: Uuid, reader_id: Uuid) -> AppResult<u64> {
        let result = MessageEntity::update_many()
            .col_expr(message::Column::IsRead, Expr::value(true))
            .filter(message::Column::ThreadId.eq(thread_id))
            .filter(message::Column::SenderId.ne(reader_id))
            .filter(message::Column::IsRead.eq(false))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn add_message(&self, msg: Message) -> AppResult<Message> {
        let model = message::ActiveModel {
            id: Set(msg.id),
            thread_id: Set(msg.thread_id),
            sender_id: Set(msg.sender_id),
            content: Set(msg.content),
            is_read: Set(msg.is_read),
            created_at: Set(msg.created_at),
        }
        .insert(&self.db)
        .await?;

        let thread_model = ThreadEntity::find_by_id(model.thread_id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;
        let mut active: thread::ActiveModel = thread_model.into();
        active.updated_at = Set(model.created_at);
        active.update(&self.db).await?;

        Ok(Message::from(model))
    }

    async fn unread_total(&self, user_id: Uuid) -> AppResult<u64> {
        let ids = self.thread_ids_for(user_id).await?;
        if ids.is_empty() {
            return Ok(0);
        }
        let count = MessageEntity::find()
            .filter(message::Column::ThreadId.is_in(ids))
            .filter(message::Column::SenderId.ne(user_id))
            .filter(message::Column::IsRead.eq(false))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn unread_in_thread(&self, thread_id: Uuid, user_id: Uuid) -> AppResult<u64> {
        let count = MessageEntity::find()
            .filter(message::Column::ThreadId.eq(thread_id))
            .filter(message::Column::SenderId.ne(user_id))
            .filter(message::Column::IsRead.eq(false))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
