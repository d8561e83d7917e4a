//! SeaORM entity for the `course_requests` table.

use sea_orm::entity::prelude::*;

use crate::domain::{BudgetRange, CourseRequest, Intention, Qualification, RequestStatus, StartTime};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub parent_id: Uuid,
    pub level_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
    pub quartier: String,
    pub frequency: String,
    pub is_online: bool,
    pub budget_range: String,
    pub start_time: String,
    pub intention: String,
    pub description: String,
    /// Scoring label persisted at creation ("Intention Forte", ...)
    pub qualification: String,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Attach the junction-table subject set and convert to the domain
    /// aggregate.
    pub fn into_domain(self, subject_ids: Vec<Uuid>) -> CourseRequest {
        CourseRequest {
            id: self.id,
            parent_id: self.parent_id,
            subject_ids,
            level_id: self.level_id,
            city_id: self.city_id,
            quartier: self.quartier,
            frequency: self.frequency,
            is_online: self.is_online,
            budget_range: BudgetRange::from(self.budget_range.as_str()),
            start_time: StartTime::from(self.start_time.as_str()),
            intention: Intention::from(self.intention.as_str()),
            description: self.description,
            qualification: Qualification::from_label(self.qualification.as_str()),
            status: RequestStatus::from(self.status.as_str()),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
