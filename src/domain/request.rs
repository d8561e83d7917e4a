//! Course requests — the leads parents post on the marketplace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::scoring::{BudgetRange, Intention, Qualification, StartTime};

/// Lifecycle of a course request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Searching for a tutor; shown on the tutor-facing feed
    Active,
    /// In discussion with one or more tutors
    Consulting,
    /// A tutor was found
    Closed,
    /// Aged out without a match
    Expired,
    /// Dropped by the parent
    Abandoned,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Active => "active",
            RequestStatus::Consulting => "consulting",
            RequestStatus::Closed => "closed",
            RequestStatus::Expired => "expired",
            RequestStatus::Abandoned => "abandoned",
        }
    }

    pub fn is_listed(&self) -> bool {
        matches!(self, RequestStatus::Active)
    }
}

impl From<&str> for RequestStatus {
    fn from(s: &str) -> Self {
        match s {
            "consulting" => RequestStatus::Consulting,
            "closed" => RequestStatus::Closed,
            "expired" => RequestStatus::Expired,
            "abandoned" => RequestStatus::Abandoned,
            _ => RequestStatus::Active,
        }
    }
}

/// A parent's posted need for a tutor.
///
/// `qualification` is scored once at creation and persisted; editing the
/// request later does not rescore it, but any edit reactivates a closed,
/// expired or abandoned request.
#[derive(Debug, Clone, Serialize)]
pub struct CourseRequest {
    pub id: Uuid,
    pub parent_id: Uuid,
    pub subject_ids: Vec<Uuid>,
    pub level_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
    pub quartier: String,
    pub frequency: String,
    pub is_online: bool,
    pub budget_range: BudgetRange,
    pub start_time: StartTime,
    pub intention: Intention,
    pub description: String,
    pub qualification: Qualification,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a request (before scoring)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewCourseRequest {
    pub subject_ids: Vec<Uuid>,
    pub level_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
    pub quartier: String,
    pub frequency: String,
    #[serde(default)]
    pub is_online: bool,
    pub budget_range: BudgetRange,
    pub start_time: StartTime,
    pub intention: Intention,
    #[serde(default)]
    pub description: String,
}

/// Partial edit of an existing request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CourseRequestUpdate {
    pub subject_ids: Option<Vec<Uuid>>,
    pub level_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
    pub quartier: Option<String>,
    pub frequency: Option<String>,
    pub is_online: Option<bool>,
    pub budget_range: Option<BudgetRange>,
    pub start_time: Option<StartTime>,
    pub intention: Option<Intention>,
    pub description: Option<String>,
}

/// API payload for a request
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseRequestResponse {
    pub id: Uuid,
    pub parent_id: Uuid,
    pub subject_ids: Vec<Uuid>,
    pub level_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
    pub quartier: String,
    pub frequency: String,
    pub is_online: bool,
    pub budget_range: BudgetRange,
    pub start_time: StartTime,
    pub intention: Intention,
    pub description: String,
    /// Persisted scoring label, e.g. "Intention Forte"
    #[schema(example = "Intention Forte")]
    pub qualification: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl From<CourseRequest> for CourseRequestResponse {
    fn from(req: CourseRequest) -> Self {
        Self {
            id: req.id,
            parent_id: req.parent_id,
            subject_ids: req.subject_ids,
            level_id: req.level_id,
            city_id: req.city_id,
            quartier: req.quartier,
            frequency: req.frequency,
            is_online: req.is_online,
            budget_range: req.budget_range,
            start_time: req.start_time,
            intention: req.intention,
            description: req.description,
            qualification: req.qualification.label().to_string(),
            status: req.status,
            created_at: req.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_active_requests_are_listed() {
        assert!(RequestStatus::Active.is_listed());
        for status in [
            RequestStatus::Consulting,
            RequestStatus::Closed,
            RequestStatus::Expired,
            RequestStatus::Abandoned,
        ] {
            assert!(!status.is_listed());
        }
    }

    #[test]
    fn status_string_round_trip() {
        for status in [
            RequestStatus::Active,
            RequestStatus::Consulting,
            RequestStatus::Closed,
            RequestStatus::Expired,
            RequestStatus::Abandoned,
        ] {
            assert_eq!(RequestStatus::from(status.as_str()), status);
        }
    }
}
