//! Back-office service - moderation, user administration, country config.
//!
//! Routes under /admin are gated by the staff middleware; the checks here
//! cover the superuser-only operations and the invariants an admin click
//! must never break (no superuser deletion, no self-deletion).

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{
    DEFAULT_CASIER_DELAY_WEEKS, DEFAULT_CONTACT_PRICE, DEFAULT_MIN_BUDGET_THRESHOLD,
    DEFAULT_REMINDER_DAYS, DEFAULT_SUBSCRIPTION_PRICE,
};
use crate::domain::{
    Actor, Country, CountryConfigUpdate, CourseRequestResponse, NewCountry, Password, Role,
    TutorProfile, TutorStatus, User, UserResponse,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Counters shown at the top of the back-office dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminStats {
    pub parents_count: u64,
    pub tutors_validated: u64,
    pub tutors_pending: u64,
    pub active_requests: u64,
    pub articles_count: u64,
}

/// Back-office dashboard payload
#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    pub stats: AdminStats,
    pub recent_parents: Vec<UserResponse>,
    pub pending_tutors: Vec<TutorProfile>,
    pub recent_tutors: Vec<TutorProfile>,
    pub recent_requests: Vec<CourseRequestResponse>,
    pub countries: Vec<Country>,
    pub admin_users: Vec<UserResponse>,
}

/// Admin verdict on a pending tutor profile
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ModerationDecision {
    Validate,
    /// Rejection always carries a note for the tutor
    Reject { note: String },
}

/// Payload for creating a sub-admin account
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewAdmin {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Back-office use cases.
#[async_trait]
pub trait AdminService: Send + Sync {
    async fn dashboard(&self) -> AppResult<AdminDashboard>;

    /// Validate or reject a pending tutor profile
    async fn moderate_tutor(
        &self,
        tutor_id: Uuid,
        decision: ModerationDecision,
    ) -> AppResult<TutorProfile>;

    /// Take a validated tutor off the marketplace
    async fn suspend_tutor(&self, tutor_id: Uuid) -> AppResult<TutorProfile>;

    /// Superuser only: create a staff account
    async fn create_sub_admin(&self, actor: &Actor, data: NewAdmin) -> AppResult<User>;

    async fn toggle_user_active(&self, user_id: Uuid) -> AppResult<User>;

    /// Superuser only; superusers and the acting admin are protected
    async fn delete_user(&self, actor: &Actor, user_id: Uuid) -> AppResult<()>;

    async fn add_country(&self, data: NewCountry) -> AppResult<Country>;

    async fn update_country_config(
        &self,
        country_id: Uuid,
        update: CountryConfigUpdate,
    ) -> AppResult<Country>;

    async fn toggle_country(&self, country_id: Uuid) -> AppResult<Country>;

    /// Superuser only
    async fn delete_country(&self, actor: &Actor, country_id: Uuid) -> AppResult<()>;

    /// Superuser only
    async fn delete_request(&self, actor: &Actor, request_id: Uuid) -> AppResult<()>;
}

/// Concrete implementation using the Unit of Work.
pub struct BackOffice<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> BackOffice<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    fn require_superuser(actor: &Actor) -> AppResult<()> {
        if actor.is_superuser {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "This action is reserved for super administrators",
            ))
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> AdminService for BackOffice<U> {
    async fn dashboard(&self) -> AppResult<AdminDashboard> {
        let stats = AdminStats {
            parents_count: self.uow.users().count_by_role(Role::Parent).await?,
            tutors_validated: self
                .uow
                .profiles()
                .count_by_status(TutorStatus::Validated)
                .await?,
            tutors_pending: self
                .uow
                .profiles()
                .count_by_status(TutorStatus::Pending)
                .await?,
            active_requests: self.uow.requests().count_active().await?,
            articles_count: self.uow.articles().count().await?,
        };

        Ok(AdminDashboard {
            stats,
            recent_parents: self
                .uow
                .users()
                .list_by_role(Role::Parent, 50)
                .await?
                .into_iter()
                .map(UserResponse::from)
                .collect(),
            pending_tutors: self
                .uow
                .profiles()
                .list_by_status(TutorStatus::Pending)
                .await?,
            recent_tutors: self.uow.profiles().recent_tutors(50).await?,
            recent_requests: self
                .uow
                .requests()
                .recent(20)
                .await?
                .into_iter()
                .map(CourseRequestResponse::from)
                .collect(),
            countries: self.uow.countries().list().await?,
            admin_users: self
                .uow
                .users()
                .list_staff()
                .await?
                .into_iter()
                .map(UserResponse::from)
                .collect(),
        })
    }

    async fn moderate_tutor(
        &self,
        tutor_id: Uuid,
        decision: ModerationDecision,
    ) -> AppResult<TutorProfile> {
        let profile = self
            .uow
            .profiles()
            .find_tutor(tutor_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !profile.status.awaits_moderation() {
            return Err(AppError::validation(
                "This profile is not awaiting moderation",
            ));
        }

        match decision {
            ModerationDecision::Validate => {
                let updated = self
                    .uow
                    .profiles()
                    .set_tutor_status(tutor_id, TutorStatus::Validated, None, Some(Utc::now()))
                    .await?;
                tracing::info!(tutor = %tutor_id, "Tutor profile validated");
                Ok(updated)
            }
            ModerationDecision::Reject { note } => {
                if note.trim().is_empty() {
                    return Err(AppError::validation("A rejection note is required"));
                }
                let updated = self
                    .uow
                    .profiles()
                    .set_tutor_status(tutor_id, TutorStatus::Rejected, Some(note), None)
                    .await?;
                tracing::info!(tutor = %tutor_id, "Tutor profile rejected");
                Ok(updated)
            }
        }
    }

    async fn suspend_tutor(&self, tutor_id: Uuid) -> AppResult<TutorProfile> {
        let profile = self
            .uow
            .profiles()
            .find_tutor(tutor_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !profile.status.can_suspend() {
            return Err(AppError::validation(
                "Only validated tutors can be suspended",
            ));
        }

        let updated = self
            .uow
            .profiles()
            .set_tutor_status(tutor_id, TutorStatus::Suspended, None, None)
            .await?;
        tracing::warn!(tutor = %tutor_id, "Tutor profile suspended");
        Ok(updated)
    }

    async fn create_sub_admin(&self, actor: &Actor, data: NewAdmin) -> AppResult<User> {
        Self::require_superuser(actor)?;

        if self.uow.users().find_by_email(&data.email).await?.is_some() {
            return Err(AppError::conflict("User"));
        }

        let password_hash = Password::new(&data.password)?.into_string();
        let now = Utc::now();

        self.uow
            .users()
            .create(User {
                id: Uuid::new_v4(),
                username: data.email.clone(),
                email: data.email,
                password_hash,
                first_name: data.first_name,
                last_name: data.last_name,
                phone: String::new(),
                role: Role::Admin,
                country_id: None,
                is_superuser: false,
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .await
    }

    async fn toggle_user_active(&self, user_id: Uuid) -> AppResult<User> {
        let user = self
            .uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.uow.users().set_active(user_id, !user.is_active).await
    }

    async fn delete_user(&self, actor: &Actor, user_id: Uuid) -> AppResult<()> {
        Self::require_superuser(actor)?;

        let target = self
            .uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound)?;

        // The two accounts an admin click must never remove
        if target.is_superuser {
            return Err(AppError::forbidden(
                "Super administrator accounts cannot be deleted",
            ));
        }
        if target.id == actor.id {
            return Err(AppError::forbidden("You cannot delete your own account"));
        }

        self.uow.users().delete(user_id).await?;
        tracing::warn!(user = %user_id, by = %actor.id, "User account deleted");
        Ok(())
    }

    async fn add_country(&self, data: NewCountry) -> AppResult<Country> {
        let code = data.code.to_uppercase();
        if self.uow.countries().find_by_code(&code).await?.is_some() {
            return Err(AppError::conflict("Country code"));
        }

        let now = Utc::now();
        self.uow
            .countries()
            .create(Country {
                id: Uuid::new_v4(),
                name: data.name,
                code,
                currency_symbol: data.currency_symbol,
                is_active: true,
                min_budget_threshold: DEFAULT_MIN_BUDGET_THRESHOLD,
                subscription_price: DEFAULT_SUBSCRIPTION_PRICE,
                contact_price: DEFAULT_CONTACT_PRICE,
                casier_delay_weeks: DEFAULT_CASIER_DELAY_WEEKS,
                reminder_days: DEFAULT_REMINDER_DAYS,
                created_at: now,
                updated_at: now,
            })
            .await
    }

    async fn update_country_config(
        &self,
        country_id: Uuid,
        update: CountryConfigUpdate,
    ) -> AppResult<Country> {
        let mut country = self
            .uow
            .countries()
            .find(country_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if let Some(price) = update.subscription_price {
            country.subscription_price = price;
        }
        if let Some(threshold) = update.min_budget_threshold {
            country.min_budget_threshold = threshold;
        }
        if let Some(price) = update.contact_price {
            country.contact_price = price;
        }
        if let Some(weeks) = update.casier_delay_weeks {
            country.casier_delay_weeks = weeks;
        }
        if let Some(days) = update.reminder_days {
            country.reminder_days = days;
        }

        self.uow.countries().update(country).await
    }

    async fn toggle_country(&self, country_id: Uuid) -> AppResult<Country> {
        let mut country = self
            .uow
            .countries()
            .find(country_id)
            .await?
            .ok_or(AppError::NotFound)?;

        country.is_active = !country.is_active;
        self.uow.countries().update(country).await
    }

    async fn delete_country(&self, actor: &Actor, country_id: Uuid) -> AppResult<()> {
        Self::require_superuser(actor)?;
        self.uow.countries().delete(country_id).await
    }

    async fn delete_request(&self, actor: &Actor, request_id: Uuid) -> AppResult<()> {
        Self::require_superuser(actor)?;
        self.uow.requests().delete(request_id).await
    }
}
