//! Profile service - role-branched dashboards and profile edits.
//!
//! Profiles are created lazily: the first dashboard visit of a tutor or
//! parent materializes an empty profile row.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    Actor, CourseRequestResponse, ParentProfile, ParentProfileUpdate, Role, TutorProfile,
    TutorProfileUpdate, UpdateAccount, User,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Role-branched dashboard payload
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Dashboard {
    Tutor {
        profile: TutorProfile,
    },
    Parent {
        profile: ParentProfile,
        requests: Vec<CourseRequestResponse>,
    },
    /// Staff accounts use the back-office dashboard instead
    Admin,
}

/// Profile use cases.
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Dashboard for the current user; creates the profile on first visit
    async fn dashboard(&self, actor: &Actor) -> AppResult<Dashboard>;

    /// Tutor self-service profile edit; draft and rejected profiles
    /// re-enter the moderation queue on save
    async fn update_tutor_profile(
        &self,
        actor: &Actor,
        update: TutorProfileUpdate,
    ) -> AppResult<TutorProfile>;

    async fn update_parent_profile(
        &self,
        actor: &Actor,
        update: ParentProfileUpdate,
    ) -> AppResult<ParentProfile>;

    /// Name/email/phone edits shared by both dashboards
    async fn update_account(&self, actor: &Actor, update: UpdateAccount) -> AppResult<User>;

    async fn get_or_create_tutor(&self, user_id: Uuid) -> AppResult<TutorProfile>;

    async fn get_or_create_parent(&self, user_id: Uuid) -> AppResult<ParentProfile>;
}

/// Concrete implementation using the Unit of Work.
pub struct Profiles<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Profiles<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ProfileService for Profiles<U> {
    async fn dashboard(&self, actor: &Actor) -> AppResult<Dashboard> {
        if actor.is_staff() {
            return Ok(Dashboard::Admin);
        }

        match actor.role {
            Role::Tutor => {
                let profile = self.get_or_create_tutor(actor.id).await?;
                Ok(Dashboard::Tutor { profile })
            }
            Role::Parent => {
                let profile = self.get_or_create_parent(actor.id).await?;
                let requests = self
                    .uow
                    .requests()
                    .list_by_parent(actor.id)
                    .await?
                    .into_iter()
                    .map(CourseRequestResponse::from)
                    .collect();
                Ok(Dashboard::Parent { profile, requests })
            }
            Role::Admin => Ok(Dashboard::Admin),
        }
    }

    async fn update_tutor_profile(
        &self,
        actor: &Actor,
        update: TutorProfileUpdate,
    ) -> AppResult<TutorProfile> {
        if actor.role != Role::Tutor {
            return Err(AppError::forbidden("Only tutors can edit a tutor profile"));
        }

        let mut profile = self.get_or_create_tutor(actor.id).await?;

        if let Some(bio) = update.bio {
            profile.bio = bio;
        }
        if let Some(photo) = update.photo {
            profile.photo = Some(photo);
        }
        if let Some(city_id) = update.city_id {
            profile.city_id = Some(city_id);
        }
        if let Some(quartier) = update.quartier {
            profile.quartier = quartier;
        }
        if let Some(doc) = update.cni_document {
            profile.cni_document = Some(doc);
        }
        if let Some(doc) = update.casier_document {
            profile.casier_document = Some(doc);
        }
        if let Some(doc) = update.diplomas_document {
            profile.diplomas_document = Some(doc);
        }
        if let Some(subject_ids) = update.subject_ids {
            profile.subject_ids = subject_ids;
        }
        if let Some(level_ids) = update.level_ids {
            profile.level_ids = level_ids;
        }
        if let Some(flag) = update.is_online_class {
            profile.is_online_class = flag;
        }
        if let Some(flag) = update.is_home_class {
            profile.is_home_class = flag;
        }

        // Submitting a draft (or a rejected resubmission) queues it for
        // moderation.
        profile.status = profile.status.on_submit();

        self.uow.profiles().update_tutor(profile).await
    }

    async fn update_parent_profile(
        &self,
        actor: &Actor,
        update: ParentProfileUpdate,
    ) -> AppResult<ParentProfile> {
        if actor.role != Role::Parent {
            return Err(AppError::forbidden("Only parents can edit a parent profile"));
        }

        let mut profile = self.get_or_create_parent(actor.id).await?;
        if let Some(address) = update.address {
            profile.address = address;
        }

        self.uow.profiles().update_parent(profile).await
    }

    async fn update_account(&self, actor: &Actor, update: UpdateAccount) -> AppResult<User> {
        self.uow.users().update_account(actor.id, update).await
    }

    async fn get_or_create_tutor(&self, user_id: Uuid) -> AppResult<TutorProfile> {
        match self.uow.profiles().find_tutor_by_user(user_id).await? {
            Some(profile) => Ok(profile),
            None => self.uow.profiles().create_tutor(user_id).await,
        }
    }

    async fn get_or_create_parent(&self, user_id: Uuid) -> AppResult<ParentProfile> {
        match self.uow.profiles().find_parent_by_user(user_id).await? {
            Some(profile) => Ok(profile),
            None => self.uow.profiles().create_parent(user_id).await,
        }
    }
}
