//! Tutor and parent profile repository.
//!
//! Tutor subject/level sets live in junction tables and are replaced
//! wholesale on update, then re-attached when loading aggregates.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::parent_profile::{self, Entity as ParentEntity};
use super::entities::tutor_level::{self, Entity as TutorLevelEntity};
use super::entities::tutor_profile::{self, Entity as TutorEntity};
use super::entities::tutor_subject::{self, Entity as TutorSubjectEntity};
use crate::domain::{ParentProfile, TutorProfile, TutorStatus};
use crate::errors::{AppError, AppResult};

/// Filters for the public tutor directory
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TutorSearch {
    pub subject_id: Option<Uuid>,
    pub level_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
}

/// Data access for tutor and parent profiles.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_tutor(&self, id: Uuid) -> AppResult<Option<TutorProfile>>;

    async fn find_tutor_by_user(&self, user_id: Uuid) -> AppResult<Option<TutorProfile>>;

    /// Blank draft profile, created lazily on first dashboard visit
    async fn create_tutor(&self, user_id: Uuid) -> AppResult<TutorProfile>;

    /// Persist editable fields, status and junction sets
    async fn update_tutor(&self, profile: TutorProfile) -> AppResult<TutorProfile>;

    /// Moderation write: status, optional admin note, optional validation stamp
    async fn set_tutor_status(
        &self,
        id: Uuid,
        status: TutorStatus,
        admin_notes: Option<String>,
        validated_at: Option<DateTime<Utc>>,
    ) -> AppResult<TutorProfile>;

    /// Validated tutors matching the public directory filters
    async fn search_validated(&self, search: TutorSearch) -> AppResult<Vec<TutorProfile>>;

    async fn list_by_status(&self, status: TutorStatus) -> AppResult<Vec<TutorProfile>>;

    async fn recent_tutors(&self, limit: u64) -> AppResult<Vec<TutorProfile>>;

    async fn count_by_status(&self, status: TutorStatus) -> AppResult<u64>;

    /// Pending profiles stuck in the queue since before `cutoff`
    async fn pending_since_before(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<TutorProfile>>;

    async fn find_parent_by_user(&self, user_id: Uuid) -> AppResult<Option<ParentProfile>>;

    async fn create_parent(&self, user_id: Uuid) -> AppResult<ParentProfile>;

    async fn update_parent(&self, profile: ParentProfile) -> AppResult<ParentProfile>;
}

/// SeaORM-backed implementation
pub struct ProfileStore {
    db: DatabaseConnection,
}

impl ProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Bulk-load junction sets for a batch of tutor models and assemble
    /// domain aggregates, avoiding per-row queries.
    async fn assemble(&self, models: Vec<tutor_profile::Model>) -> AppResult<Vec<TutorProfile>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();

        let mut subjects: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for link in TutorSubjectEntity::find()
            .filter(tutor_subject::Column::TutorId.is_in(ids.clone()))
            .all(&self.db)
            .await?
        {
            subjects.entry(link.tutor_id).or_default().push(link.subject_id);
        }

        let mut levels: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for link in TutorLevelEntity::find()
            .filter(tutor_level::Column::TutorId.is_in(ids))
            .all(&self.db)
            .await?
        {
            levels.entry(link.tutor_id).or_default().push(link.level_id);
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let s = subjects.remove(&m.id).unwrap_or_default();
                let l = levels.remove(&m.id).unwrap_or_default();
                m.into_domain(s, l)
            })
            .collect())
    }

    async fn assemble_one(&self, model: tutor_profile::Model) -> AppResult<TutorProfile> {
        let mut assembled = self.assemble(vec![model]).await?;
        assembled
            .pop()
            .ok_or_else(|| AppError::internal("assemble dropped a tutor profile"))
    }

    async fn replace_junctions(
        &self,
        tutor_id: Uuid,
        subject_ids: &[Uuid],
        level_ids: &[Uuid],
    ) -> AppResult<()> {
        TutorSubjectEntity::delete_many()
            .filter(tutor_subject::Column::TutorId.eq(tutor_id))
            .exec(&self.db)
            .await?;
        if !subject_ids.is_empty() {
            let rows = subject_ids.iter().map(|sid| tutor_subject::ActiveModel {
                tutor_id: Set(tutor_id),
                subject_id: Set(*sid),
            });
            TutorSubjectEntity::insert_many(rows).exec(&self.db).await?;
        }

        TutorLevelEntity::delete_many()
            .filter(tutor_level::Column::TutorId.eq(tutor_id))
            .exec(&self.db)
            .await?;
        if !level_ids.is_empty() {
            let rows = level_ids.iter().map(|lid| tutor_level::ActiveModel {
                tutor_id: Set(tutor_id),
                level_id: Set(*lid),
            });
            TutorLevelEntity::insert_many(rows).exec(&self.db).await?;
        }

        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for ProfileStore {
    async fn find_tutor(&self, id: Uuid) -> AppResult<Option<TutorProfile>> {
        match TutorEntity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(self.assemble_one(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_tutor_by_user(&self, user_id: Uuid) -> AppResult<Option<TutorProfile>> {
        let model = TutorEntity::find()
            .filter(tutor_profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        match model {
            Some(model) => Ok(Some(self.assemble_one(model).await?)),
            None => Ok(None),
        }
    }

    async fn create_tutor(&self, user_id: Uuid) -> AppResult<TutorProfile> {
        let now = Utc::now();
        let model = tutor_profile::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            bio: Set(String::new()),
            photo: Set(None),
            city_id: Set(None),
            quartier: Set(String::new()),
            cni_document: Set(None),
            casier_document: Set(None),
            diplomas_document: Set(None),
            is_online_class: Set(false),
            is_home_class: Set(true),
            status: Set(TutorStatus::Draft.as_str().to_string()),
            admin_notes: Set(String::new()),
            created_at: Set(now),
            updated_at: Set(now),
            validated_at: Set(None),
        }
        .insert(&self.db)
        .await?;

        Ok(model.into_domain(Vec::new(), Vec::new()))
    }

    async fn update_tutor(&self, profile: TutorProfile) -> AppResult<TutorProfile> {
        let model = TutorEntity::find_by_id(profile.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: tutor_profile::ActiveModel = model.into();
        active.bio = Set(profile.bio.clone());
        active.photo = Set(profile.photo.clone());
        active.city_id = Set(profile.city_id);
        active.quartier = Set(profile.quartier.clone());
        active.cni_document = Set(profile.cni_document.clone());
        active.casier_document = Set(profile.casier_document.clone());
        active.diplomas_document = Set(profile.diplomas_document.clone());
        active.is_online_class = Set(profile.is_online_class);
        active.is_home_class = Set(profile.is_home_class);
        active.status = Set(profile.status.as_str().to_string());
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        self.replace_junctions(profile.id, &profile.subject_ids, &profile.level_ids)
            .await?;

        Ok(model.into_domain(profile.subject_ids, profile.level_ids))
    }

    async fn set_tutor_status(
        &self,
        id: Uuid,
        status: TutorStatus,
        admin_notes: Option<String>,
        validated_at: Option<DateTime<Utc>>,
    ) -> AppResult<TutorProfile> {
        let model = TutorEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: tutor_profile::ActiveModel = model.into();
        active.status = Set(status.as_str().to_string());
        if let Some(notes) = admin_notes {
            active.admin_notes = Set(notes);
        }
        if validated_at.is_some() {
            active.validated_at = Set(validated_at);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        self.assemble_one(model).await
    }

    async fn search_validated(&self, search: TutorSearch) -> AppResult<Vec<TutorProfile>> {
        let mut query = TutorEntity::find()
            .filter(tutor_profile::Column::Status.eq(TutorStatus::Validated.as_str()));

        if let Some(city_id) = search.city_id {
            query = query.filter(tutor_profile::Column::CityId.eq(city_id));
        }
        if let Some(subject_id) = search.subject_id {
            let tutor_ids: Vec<Uuid> = TutorSubjectEntity::find()
                .filter(tutor_subject::Column::SubjectId.eq(subject_id))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|link| link.tutor_id)
                .collect();
            query = query.filter(tutor_profile::Column::Id.is_in(tutor_ids));
        }
        if let Some(level_id) = search.level_id {
            let tutor_ids: Vec<Uuid> = TutorLevelEntity::find()
                .filter(tutor_level::Column::LevelId.eq(level_id))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|link| link.tutor_id)
                .collect();
            query = query.filter(tutor_profile::Column::Id.is_in(tutor_ids));
        }

        let models = query
            .order_by_desc(tutor_profile::Column::ValidatedAt)
            .all(&self.db)
            .await?;
        self.assemble(models).await
    }

    async fn list_by_status(&self, status: TutorStatus) -> AppResult<Vec<TutorProfile>> {
        let models = TutorEntity::find()
            .filter(tutor_profile::Column::Status.eq(status.as_str()))
            .order_by_asc(tutor_profile::Column::UpdatedAt)
            .all(&self.db)
            .await?;
        self.assemble(models).await
    }

    async fn recent_tutors(&self, limit: u64) -> AppResult<Vec<TutorProfile>> {
        let models = TutorEntity::find()
            .order_by_desc(tutor_profile::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;
        self.assemble(models).await
    }

    async fn count_by_status(&self, status: TutorStatus) -> AppResult<u64> {
        let count = TutorEntity::find()
            .filter(tutor_profile::Column::Status.eq(status.as_str()))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn pending_since_before(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<TutorProfile>> {
        let models = TutorEntity::find()
            .filter(tutor_profile::Column::Status.eq(TutorStatus::Pending.as_str()))
            .filter(tutor_profile::Column::UpdatedAt.lt(cutoff))
            .all(&self.db)
            .await?;
        self.assemble(models).await
    }

    async fn find_parent_by_user(&self, user_id: Uuid) -> AppResult<Option<ParentProfile>> {
        let model = ParentEntity::find()
            .filter(parent_profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(model.map(ParentProfile::from))
    }

    async fn create_parent(&self, user_id: Uuid) -> AppResult<ParentProfile> {
        let now = Utc::now();
        let model = parent_profile::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            is_phone_verified: Set(false),
            address: Set(String::new()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(ParentProfile::from(model))
    }

    async fn update_parent(&self, profile: ParentProfile) -> AppResult<ParentProfile> {
        let model = ParentEntity::find_by_id(profile.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: parent_profile::ActiveModel = model.into();
        active.is_phone_verified = Set(profile.is_phone_verified);
        active.address = Set(profile.address.clone());
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(ParentProfile::from(model))
    }
}
