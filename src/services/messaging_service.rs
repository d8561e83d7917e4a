//! Messaging service - two-party threads.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    Actor, Message, MessageResponse, Participant, Thread, ThreadDetail, ThreadSummary,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Messaging use cases.
#[async_trait]
pub trait MessagingService: Send + Sync {
    /// Find or create the thread between the actor and another user.
    /// Never creates a duplicate thread for the same pair.
    async fn start_thread(&self, actor: &Actor, target_user_id: Uuid) -> AppResult<Thread>;

    /// The actor's threads, most recently active first
    async fn inbox(&self, actor: &Actor) -> AppResult<Vec<ThreadSummary>>;

    /// Open a thread: participant-only, and everything the other side sent
    /// is marked read as a side effect
    async fn open_thread(&self, actor: &Actor, thread_id: Uuid) -> AppResult<ThreadDetail>;

    async fn post_message(
        &self,
        actor: &Actor,
        thread_id: Uuid,
        content: String,
    ) -> AppResult<MessageResponse>;

    /// Unread badge count across all threads
    async fn unread_count(&self, actor: &Actor) -> AppResult<u64>;
}

/// Concrete implementation using the Unit of Work.
pub struct Messenger<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Messenger<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Resolve the other participant of a thread, enforcing membership of
    /// the viewer.
    async fn other_participant(&self, thread_id: Uuid, viewer_id: Uuid) -> AppResult<Participant> {
        let participants = self.uow.threads().participants(thread_id).await?;
        if !participants.contains(&viewer_id) {
            return Err(AppError::forbidden(
                "You are not a participant of this conversation",
            ));
        }

        let other_id = participants
            .into_iter()
            .find(|id| *id != viewer_id)
            .ok_or_else(|| AppError::internal("thread without a second participant"))?;

        let user = self
            .uow
            .users()
            .find_by_id(other_id)
            .await?
            .ok_or(AppError::NotFound)?;
        Ok(Participant::from(user))
    }
}

#[async_trait]
impl<U: UnitOfWork> MessagingService for Messenger<U> {
    async fn start_thread(&self, actor: &Actor, target_user_id: Uuid) -> AppResult<Thread> {
        if target_user_id == actor.id {
            return Err(AppError::validation("You cannot message yourself"));
        }

        // Target must exist
        self.uow
            .users()
            .find_by_id(target_user_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if let Some(existing) = self
            .uow
            .threads()
            .find_between(actor.id, target_user_id)
            .await?
        {
            return Ok(existing);
        }

        self.uow.threads().create(actor.id, target_user_id).await
    }

    async fn inbox(&self, actor: &Actor) -> AppResult<Vec<ThreadSummary>> {
        let threads = self.uow.threads().list_for_user(actor.id).await?;

        let mut summaries = Vec::with_capacity(threads.len());
        for thread in threads {
            let other = self.other_participant(thread.id, actor.id).await?;
            let last_message = self
                .uow
                .threads()
                .last_message(thread.id)
                .await?
                .map(MessageResponse::from);
            let unread_count = self
                .uow
                .threads()
                .unread_in_thread(thread.id, actor.id)
                .await?;

            summaries.push(ThreadSummary {
                id: thread.id,
                other,
                last_message,
                unread_count,
                updated_at: thread.updated_at,
            });
        }

        Ok(summaries)
    }

    async fn open_thread(&self, actor: &Actor, thread_id: Uuid) -> AppResult<ThreadDetail> {
        self.uow
            .threads()
            .find(thread_id)
            .await?
            .ok_or(AppError::NotFound)?;

        // Membership check happens here too
        let other = self.other_participant(thread_id, actor.id).await?;

        // Opening the thread consumes the unread state of everything the
        // other side sent.
        self.uow.threads().mark_read(thread_id, actor.id).await?;

        let messages = self
            .uow
            .threads()
            .messages(thread_id)
            .await?
            .into_iter()
            .map(MessageResponse::from)
            .collect();

        Ok(ThreadDetail {
            id: thread_id,
            other,
            messages,
        })
    }

    async fn post_message(
        &self,
        actor: &Actor,
        thread_id: Uuid,
        content: String,
    ) -> AppResult<MessageResponse> {
        if content.trim().is_empty() {
            return Err(AppError::validation("Message content cannot be empty"));
        }

        self.uow
            .threads()
            .find(thread_id)
            .await?
            .ok_or(AppError::NotFound)?;

        // Only participants may post
        self.other_participant(thread_id, actor.id).await?;

        let message = self
            .uow
            .threads()
            .add_message(Message {
                id: Uuid::new_v4(),
                thread_id,
                sender_id: actor.id,
                content,
                is_read: false,
                created_at: Utc::now(),
            })
            .await?;

        Ok(MessageResponse::from(message))
    }

    async fn unread_count(&self, actor: &Actor) -> AppResult<u64> {
        self.uow.threads().unread_total(actor.id).await
    }
}
