//! Tutor and parent profile entities, including the tutor moderation
//! state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Moderation state of a tutor profile.
///
/// `draft → pending → {validated, rejected}`, with `suspended` reachable
/// from `validated` only. A profile save while in `draft` or `rejected`
/// re-enters the moderation queue automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TutorStatus {
    Draft,
    Pending,
    Validated,
    Rejected,
    Suspended,
}

impl TutorStatus {
    pub const ALL: [TutorStatus; 5] = [
        TutorStatus::Draft,
        TutorStatus::Pending,
        TutorStatus::Validated,
        TutorStatus::Rejected,
        TutorStatus::Suspended,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TutorStatus::Draft => "draft",
            TutorStatus::Pending => "pending",
            TutorStatus::Validated => "validated",
            TutorStatus::Rejected => "rejected",
            TutorStatus::Suspended => "suspended",
        }
    }

    /// Publicly listed / reachable iff validated.
    pub fn is_visible(&self) -> bool {
        matches!(self, TutorStatus::Validated)
    }

    /// Status after the tutor saves their profile. Draft and rejected
    /// profiles go (back) to the moderation queue; other states keep.
    pub fn on_submit(self) -> Self {
        match self {
            TutorStatus::Draft | TutorStatus::Rejected => TutorStatus::Pending,
            other => other,
        }
    }

    /// Admin validate/reject is only meaningful from the queue.
    pub fn awaits_moderation(&self) -> bool {
        matches!(self, TutorStatus::Pending)
    }

    /// Suspension applies to live profiles only.
    pub fn can_suspend(&self) -> bool {
        matches!(self, TutorStatus::Validated)
    }
}

impl From<&str> for TutorStatus {
    fn from(s: &str) -> Self {
        match s {
            "pending" => TutorStatus::Pending,
            "validated" => TutorStatus::Validated,
            "rejected" => TutorStatus::Rejected,
            "suspended" => TutorStatus::Suspended,
            _ => TutorStatus::Draft,
        }
    }
}

impl std::fmt::Display for TutorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tutor profile aggregate. Subjects and levels are id sets resolved
/// against the teaching catalog.
#[derive(Debug, Clone, Serialize)]
pub struct TutorProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: String,
    pub photo: Option<String>,
    pub city_id: Option<Uuid>,
    pub quartier: String,
    /// Restricted document paths; never exposed on public payloads
    pub cni_document: Option<String>,
    pub casier_document: Option<String>,
    pub diplomas_document: Option<String>,
    pub subject_ids: Vec<Uuid>,
    pub level_ids: Vec<Uuid>,
    pub is_online_class: bool,
    pub is_home_class: bool,
    pub status: TutorStatus,
    pub admin_notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub validated_at: Option<DateTime<Utc>>,
}

impl TutorProfile {
    pub fn is_visible(&self) -> bool {
        self.status.is_visible()
    }
}

/// Parent profile (1:1 with a parent user)
#[derive(Debug, Clone, Serialize)]
pub struct ParentProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub is_phone_verified: bool,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a tutor may edit from their dashboard
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TutorProfileUpdate {
    pub bio: Option<String>,
    pub photo: Option<String>,
    pub city_id: Option<Uuid>,
    pub quartier: Option<String>,
    pub cni_document: Option<String>,
    pub casier_document: Option<String>,
    pub diplomas_document: Option<String>,
    pub subject_ids: Option<Vec<Uuid>>,
    pub level_ids: Option<Vec<Uuid>>,
    pub is_online_class: Option<bool>,
    pub is_home_class: Option<bool>,
}

/// Fields a parent may edit from their dashboard
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ParentProfileUpdate {
    pub address: Option<String>,
}

/// Contact details revealed behind the paywall
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
}

/// Directory card for a validated tutor
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TutorCard {
    pub id: Uuid,
    pub display_name: String,
    pub bio: String,
    pub photo: Option<String>,
    pub city: Option<String>,
    pub quartier: String,
    pub subjects: Vec<String>,
    pub levels: Vec<String>,
    pub is_online_class: bool,
    pub is_home_class: bool,
}

/// Public detail page payload. `contact` is None while locked.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TutorDetail {
    #[serde(flatten)]
    pub card: TutorCard,
    pub is_unlocked: bool,
    pub contact: Option<ContactInfo>,
    pub avg_rating: f64,
    pub review_count: u64,
    pub reviews: Vec<super::review::ReviewResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_validated_is_visible() {
        for status in TutorStatus::ALL {
            assert_eq!(status.is_visible(), status == TutorStatus::Validated);
        }
    }

    #[test]
    fn submit_moves_draft_and_rejected_to_pending() {
        assert_eq!(TutorStatus::Draft.on_submit(), TutorStatus::Pending);
        assert_eq!(TutorStatus::Rejected.on_submit(), TutorStatus::Pending);
        assert_eq!(TutorStatus::Pending.on_submit(), TutorStatus::Pending);
        assert_eq!(TutorStatus::Validated.on_submit(), TutorStatus::Validated);
        assert_eq!(TutorStatus::Suspended.on_submit(), TutorStatus::Suspended);
    }

    #[test]
    fn suspension_only_from_validated() {
        for status in TutorStatus::ALL {
            assert_eq!(status.can_suspend(), status == TutorStatus::Validated);
        }
    }

    #[test]
    fn status_string_round_trip() {
        for status in TutorStatus::ALL {
            assert_eq!(TutorStatus::from(status.as_str()), status);
        }
    }
}
