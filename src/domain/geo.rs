//! Countries (financial configuration records) and cities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::scoring::ScoringPolicy;

/// A country the platform operates in, carrying its admin-editable
/// financial knobs. Pure configuration, no behavior beyond `scoring_policy`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Country {
    pub id: Uuid,
    pub name: String,
    /// ISO code, e.g. "CI"
    #[schema(example = "CI")]
    pub code: String,
    #[schema(example = "F CFA")]
    pub currency_symbol: String,
    pub is_active: bool,
    /// Budget floor (FCFA) for a lead to qualify as strong/warm
    pub min_budget_threshold: i32,
    /// Monthly tutor subscription price
    pub subscription_price: i32,
    /// Contact-unlock price charged to parents
    pub contact_price: i32,
    /// Grace period for the criminal-record document
    pub casier_delay_weeks: i32,
    /// Days before a pending tutor gets a moderation reminder
    pub reminder_days: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Country {
    pub fn scoring_policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            min_budget_threshold: self.min_budget_threshold,
        }
    }
}

/// Admin-editable financial configuration of a country
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CountryConfigUpdate {
    pub subscription_price: Option<i32>,
    pub min_budget_threshold: Option<i32>,
    pub contact_price: Option<i32>,
    pub casier_delay_weeks: Option<i32>,
    pub reminder_days: Option<i32>,
}

/// Payload for adding a country
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewCountry {
    pub name: String,
    pub code: String,
    pub currency_symbol: String,
}

/// A city inside a country
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct City {
    pub id: Uuid,
    pub country_id: Uuid,
    pub name: String,
}
