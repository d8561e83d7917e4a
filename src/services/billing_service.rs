//! Billing service - contact-unlock purchases.
//!
//! The payment provider is a stub that grants the unlock instantly; the
//! charged amount still comes from the tutor's country configuration.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::DEFAULT_CONTACT_PRICE;
use crate::domain::{Actor, ContactUnlock, Role, UnlockResponse};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Billing use cases.
#[async_trait]
pub trait BillingService: Send + Sync {
    /// Idempotent unlock purchase: a repeat buy returns the existing
    /// unlock without charging again
    async fn unlock_contact(&self, actor: &Actor, tutor_id: Uuid) -> AppResult<UnlockResponse>;

    /// The parent's purchased unlocks, newest first
    async fn my_unlocks(&self, actor: &Actor) -> AppResult<Vec<UnlockResponse>>;
}

/// Concrete implementation using the Unit of Work.
pub struct Billing<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Billing<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Contact price from the tutor's country, or the platform default.
    async fn contact_price(&self, tutor_user_id: Uuid) -> AppResult<i32> {
        let tutor_user = self.uow.users().find_by_id(tutor_user_id).await?;
        let country_id = tutor_user.and_then(|u| u.country_id);

        let price = match country_id {
            Some(country_id) => self
                .uow
                .countries()
                .find(country_id)
                .await?
                .map(|c| c.contact_price)
                .unwrap_or(DEFAULT_CONTACT_PRICE),
            None => DEFAULT_CONTACT_PRICE,
        };
        Ok(price)
    }
}

#[async_trait]
impl<U: UnitOfWork> BillingService for Billing<U> {
    async fn unlock_contact(&self, actor: &Actor, tutor_id: Uuid) -> AppResult<UnlockResponse> {
        if actor.role != Role::Parent {
            return Err(AppError::forbidden("Only parents can unlock tutor contacts"));
        }

        let profile = self
            .uow
            .profiles()
            .find_tutor(tutor_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if !profile.is_visible() {
            return Err(AppError::NotFound);
        }

        // Already unlocked: no-op, no second charge
        if let Some(existing) = self.uow.unlocks().find(actor.id, tutor_id).await? {
            return Ok(UnlockResponse::from_unlock(existing, false));
        }

        let amount = self.contact_price(profile.user_id).await?;

        // Payment stub: grant immediately at the configured price. The
        // unique (parent, tutor) index catches a concurrent double-buy.
        let unlock = self
            .uow
            .unlocks()
            .create(ContactUnlock {
                id: Uuid::new_v4(),
                parent_id: actor.id,
                tutor_id,
                amount_paid: amount,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(
            parent = %actor.id,
            tutor = %tutor_id,
            amount = amount,
            "Contact unlocked"
        );

        Ok(UnlockResponse::from_unlock(unlock, true))
    }

    async fn my_unlocks(&self, actor: &Actor) -> AppResult<Vec<UnlockResponse>> {
        let unlocks = self.uow.unlocks().list_by_parent(actor.id).await?;
        Ok(unlocks
            .into_iter()
            .map(|u| UnlockResponse::from_unlock(u, false))
            .collect())
    }
}
