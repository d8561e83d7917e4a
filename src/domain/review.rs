//! Parent reviews of tutors.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Inclusive rating bounds
pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

/// A review left by a parent who unlocked the tutor's contact.
/// One review per (tutor, author) pair.
#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub id: Uuid,
    pub tutor_id: Uuid,
    pub author_id: Uuid,
    pub rating: i16,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Review as shown on the tutor detail page
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub author_name: String,
    #[schema(minimum = 1, maximum = 5)]
    pub rating: i16,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Check a submitted rating against the 1–5 scale.
pub fn rating_in_range(rating: i16) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert!(!rating_in_range(0));
        assert!(rating_in_range(1));
        assert!(rating_in_range(5));
        assert!(!rating_in_range(6));
    }
}
