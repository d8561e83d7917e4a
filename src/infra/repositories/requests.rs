//! Course request repository.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::course_request::{self, Entity as RequestEntity};
use super::entities::request_subject::{self, Entity as RequestSubjectEntity};
use crate::domain::{CourseRequest, RequestStatus};
use crate::errors::{AppError, AppResult};

/// Data access for course requests.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RequestRepository: Send + Sync {
    async fn find(&self, id: Uuid) -> AppResult<Option<CourseRequest>>;

    /// Persist a scored request
    async fn create(&self, request: CourseRequest) -> AppResult<CourseRequest>;

    /// Persist edited fields and the subject set. The stored qualification
    /// label is left untouched.
    async fn update(&self, request: CourseRequest) -> AppResult<CourseRequest>;

    async fn list_by_parent(&self, parent_id: Uuid) -> AppResult<Vec<CourseRequest>>;

    /// Active requests for the tutor-facing feed, newest first
    async fn list_active(&self, city_id: Option<Uuid>) -> AppResult<Vec<CourseRequest>>;

    async fn recent(&self, limit: u64) -> AppResult<Vec<CourseRequest>>;

    async fn count_active(&self) -> AppResult<u64>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Bulk-expire active requests untouched since `cutoff`; returns the
    /// number of rows affected.
    async fn expire_stale(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;
}

/// SeaORM-backed implementation
pub struct RequestStore {
    db: DatabaseConnection,
}

impl RequestStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn assemble(&self, models: Vec<course_request::Model>) -> AppResult<Vec<CourseRequest>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();

        let mut subjects: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for link in RequestSubjectEntity::find()
            .filter(request_subject::Column::RequestId.is_in(ids))
            .all(&self.db)
            .await?
        {
            subjects
                .entry(link.request_id)
                .or_default()
                .push(link.subject_id);
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let s = subjects.remove(&m.id).unwrap_or_default();
                m.into_domain(s)
            })
            .collect())
    }

    async fn replace_subjects(&self, request_id: Uuid, subject_ids: &[Uuid]) -> AppResult<()> {
        RequestSubjectEntity::delete_many()
            .filter(request_subject::Column::RequestId.eq(request_id))
            .exec(&self.db)
            .await?;
        if !subject_ids.is_empty() {
            let rows = subject_ids.iter().map(|sid| request_subject::ActiveModel {
                request_id: Set(request_id),
                subject_id: Set(*sid),
            });
            RequestSubjectEntity::insert_many(rows).exec(&self.db).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl RequestRepository for RequestStore {
    async fn find(&self, id: Uuid) -> AppResult<Option<CourseRequest>> {
        match RequestEntity::find_by_id(id).one(&self.db).await? {
            Some(model) => {
                let mut assembled = self.assemble(vec![model]).await?;
                Ok(assembled.pop())
            }
            None => Ok(None),
        }
    }

    async fn create(&self, req: CourseRequest) -> AppResult<CourseRequest> {
        let model = course_request::ActiveModel {
            id: Set(req.id),
            parent_id: Set(req.parent_id),
            level_id: Set(req.level_id),
            city_id: Set(req.city_id),
            quartier: Set(req.quartier.clone()),
            frequency: Set(req.frequency.clone()),
            is_online: Set(req.is_online),
            budget_range: Set(req.budget_range.as_str().to_string()),
            start_time: Set(req.start_time.as_str().to_string()),
            intention: Set(req.intention.as_str().to_string()),
            description: Set(req.description.clone()),
            qualification: Set(req.qualification.label().to_string()),
            status: Set(req.status.as_str().to_string()),
            created_at: Set(req.created_at),
            updated_at: Set(req.updated_at),
        }
        .insert(&self.db)
        .await?;

        self.replace_subjects(model.id, &req.subject_ids).await?;
        Ok(model.into_domain(req.subject_ids))
    }

    async fn update(&self, req: CourseRequest) -> AppResult<CourseRequest> {
        let model = RequestEntity::find_by_id(req.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: course_request::ActiveModel = model.into();
        active.level_id = Set(req.level_id);
        active.city_id = Set(req.city_id);
        active.quartier = Set(req.quartier.clone());
        active.frequency = Set(req.frequency.clone());
        active.is_online = Set(req.is_online);
        active.budget_range = Set(req.budget_range.as_str().to_string());
        active.start_time = Set(req.start_time.as_str().to_string());
        active.intention = Set(req.intention.as_str().to_string());
        active.description = Set(req.description.clone());
        active.status = Set(req.status.as_str().to_string());
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        self.replace_subjects(req.id, &req.subject_ids).await?;
        Ok(model.into_domain(req.subject_ids))
    }

    async fn list_by_parent(&self, parent_id: Uuid) -> AppResult<Vec<CourseRequest>> {
        let models = RequestEntity::find()
            .filter(course_request::Column::ParentId.eq(parent_id))
            .order_by_desc(course_request::Column::CreatedAt)
            .all(&self.db)
            .await?;
        self.assemble(models).await
    }

    async fn list_active(&self, city_id: Option<Uuid>) -> AppResult<Vec<CourseRequest>> {
        let mut query = RequestEntity::find()
            .filter(course_request::Column::Status.eq(RequestStatus::Active.as_str()));
        if let Some(city_id) = city_id {
            query = query.filter(course_request::Column::CityId.eq(city_id));
        }
        let models = query
            .order_by_desc(course_request::Column::CreatedAt)
            .all(&self.db)
            .await?;
        self.assemble(models).await
    }

    async fn recent(&self, limit: u64) -> AppResult<Vec<CourseRequest>> {
        let models = RequestEntity::find()
            .order_by_desc(course_request::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;
        self.assemble(models).await
    }

    async fn count_active(&self) -> AppResult<u64> {
        let count = RequestEntity::find()
            .filter(course_request::Column::Status.eq(RequestStatus::Active.as_str()))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        RequestSubjectEntity::delete_many()
            .filter(request_subject::Column::RequestId.eq(id))
            .exec(&self.db)
            .await?;
        let result = RequestEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn expire_stale(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = RequestEntity::update_many()
            .col_expr(
                course_request::Column::Status,
                Expr::value(RequestStatus::Expired.as_str()),
            )
            .filter(course_request::Column::Status.eq(RequestStatus::Active.as_str()))
            .filter(course_request::Column::UpdatedAt.lt(cutoff))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
