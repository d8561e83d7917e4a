//! Contact-unlock purchases.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A parent's paid right to see one tutor's contact details.
///
/// Unique per (parent, tutor) and permanent: a repeat purchase is a no-op
/// that returns the existing record.
#[derive(Debug, Clone, Serialize)]
pub struct ContactUnlock {
    pub id: Uuid,
    pub parent_id: Uuid,
    pub tutor_id: Uuid,
    /// Amount charged at purchase time (FCFA)
    pub amount_paid: i32,
    pub created_at: DateTime<Utc>,
}

/// API payload for an unlock
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UnlockResponse {
    pub id: Uuid,
    pub tutor_id: Uuid,
    pub amount_paid: i32,
    pub created_at: DateTime<Utc>,
    /// False when the purchase was a no-op on an existing unlock
    pub newly_created: bool,
}

impl UnlockResponse {
    pub fn from_unlock(unlock: ContactUnlock, newly_created: bool) -> Self {
        Self {
            id: unlock.id,
            tutor_id: unlock.tutor_id,
            amount_paid: unlock.amount_paid,
            created_at: unlock.created_at,
            newly_created,
        }
    }
}
