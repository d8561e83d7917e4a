//! Lead qualification scoring.
//!
//! Classifies a course request's commercial strength from its budget tier,
//! start urgency and declared intention. The label is computed once when the
//! request is created and persisted with it; it is never recomputed.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::DEFAULT_MIN_BUDGET_THRESHOLD;

/// Monthly budget bracket declared by the parent (FCFA).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BudgetRange {
    /// Under 20 000
    Low,
    /// 20 000 – 30 000
    Medium,
    /// 30 000 – 50 000
    Standard,
    /// 50 000 – 80 000
    High,
    /// Over 80 000
    Premium,
}

impl BudgetRange {
    pub const ALL: [BudgetRange; 5] = [
        BudgetRange::Low,
        BudgetRange::Medium,
        BudgetRange::Standard,
        BudgetRange::High,
        BudgetRange::Premium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetRange::Low => "low",
            BudgetRange::Medium => "medium",
            BudgetRange::Standard => "standard",
            BudgetRange::High => "high",
            BudgetRange::Premium => "premium",
        }
    }

    /// Lower bound of the bracket in FCFA, compared against the per-country
    /// qualification threshold.
    pub fn floor_fcfa(&self) -> i32 {
        match self {
            BudgetRange::Low => 0,
            BudgetRange::Medium => 20_000,
            BudgetRange::Standard => 30_000,
            BudgetRange::High => 50_000,
            BudgetRange::Premium => 80_000,
        }
    }
}

impl From<&str> for BudgetRange {
    fn from(s: &str) -> Self {
        match s {
            "low" => BudgetRange::Low,
            "medium" => BudgetRange::Medium,
            "high" => BudgetRange::High,
            "premium" => BudgetRange::Premium,
            _ => BudgetRange::Standard,
        }
    }
}

/// When the parent wants lessons to begin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StartTime {
    Asap,
    /// Within one to four weeks
    WithinMonth,
    Later,
}

impl StartTime {
    pub const ALL: [StartTime; 3] = [StartTime::Asap, StartTime::WithinMonth, StartTime::Later];

    pub fn as_str(&self) -> &'static str {
        match self {
            StartTime::Asap => "asap",
            StartTime::WithinMonth => "within_month",
            StartTime::Later => "later",
        }
    }
}

impl From<&str> for StartTime {
    fn from(s: &str) -> Self {
        match s {
            "asap" => StartTime::Asap,
            "within_month" => StartTime::WithinMonth,
            _ => StartTime::Later,
        }
    }
}

/// Whether the parent intends to start lessons or is only gathering info.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Intention {
    Start,
    Info,
}

impl Intention {
    pub const ALL: [Intention; 2] = [Intention::Start, Intention::Info];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intention::Start => "start",
            Intention::Info => "info",
        }
    }
}

impl From<&str> for Intention {
    fn from(s: &str) -> Self {
        match s {
            "start" => Intention::Start,
            _ => Intention::Info,
        }
    }
}

/// Commercial strength of a lead. The persisted value is the display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Qualification {
    Strong,
    Warm,
    LimitedBudget,
}

impl Qualification {
    /// Label as shown to the sales side and stored on the request.
    pub fn label(&self) -> &'static str {
        match self {
            Qualification::Strong => "Intention Forte",
            Qualification::Warm => "Intention Tiède",
            Qualification::LimitedBudget => "Budget Limité / Autre",
        }
    }

    pub fn from_label(s: &str) -> Self {
        match s {
            "Intention Forte" => Qualification::Strong,
            "Intention Tiède" => Qualification::Warm,
            _ => Qualification::LimitedBudget,
        }
    }
}

/// Scoring knobs, sourced from the request's country record. Passed in
/// explicitly so the engine stays a pure function.
#[derive(Debug, Clone, Copy)]
pub struct ScoringPolicy {
    /// Budget floor (FCFA) a bracket must reach to qualify
    pub min_budget_threshold: i32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            min_budget_threshold: DEFAULT_MIN_BUDGET_THRESHOLD,
        }
    }
}

/// Score a lead. Total over all 30 (budget, start, intention) combinations;
/// rules are evaluated in priority order, first match wins.
pub fn qualify(
    budget: BudgetRange,
    start: StartTime,
    intention: Intention,
    policy: &ScoringPolicy,
) -> Qualification {
    let budget_qualifies = budget.floor_fcfa() >= policy.min_budget_threshold;

    if intention == Intention::Start
        && matches!(start, StartTime::Asap | StartTime::WithinMonth)
        && budget_qualifies
    {
        return Qualification::Strong;
    }

    if (intention == Intention::Info || start == StartTime::Later) && budget_qualifies {
        return Qualification::Warm;
    }

    Qualification::LimitedBudget
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_policy() -> ScoringPolicy {
        ScoringPolicy::default()
    }

    #[test]
    fn strong_lead_scenario() {
        // standard budget + asap + start is the canonical strong lead
        let q = qualify(
            BudgetRange::Standard,
            StartTime::Asap,
            Intention::Start,
            &default_policy(),
        );
        assert_eq!(q, Qualification::Strong);
        assert_eq!(q.label(), "Intention Forte");
    }

    #[test]
    fn low_budget_beats_strong_timing() {
        // the budget gate fails even with maximal urgency and intent
        let q = qualify(
            BudgetRange::Low,
            StartTime::Asap,
            Intention::Start,
            &default_policy(),
        );
        assert_eq!(q, Qualification::LimitedBudget);
        assert_eq!(q.label(), "Budget Limité / Autre");
    }

    #[test]
    fn later_start_downgrades_to_warm() {
        let q = qualify(
            BudgetRange::Premium,
            StartTime::Later,
            Intention::Start,
            &default_policy(),
        );
        assert_eq!(q, Qualification::Warm);
    }

    #[test]
    fn info_intention_is_warm_at_best() {
        for start in StartTime::ALL {
            let q = qualify(
                BudgetRange::High,
                start,
                Intention::Info,
                &default_policy(),
            );
            assert_eq!(q, Qualification::Warm, "start={:?}", start);
        }
    }

    /// Every one of the 5x3x2 = 30 combinations maps to exactly the label
    /// the priority rules dictate.
    #[test]
    fn full_matrix_matches_priority_rules() {
        let policy = default_policy();
        let mut seen = 0;

        for budget in BudgetRange::ALL {
            for start in StartTime::ALL {
                for intention in Intention::ALL {
                    seen += 1;
                    let got = qualify(budget, start, intention, &policy);

                    let budget_ok = budget.floor_fcfa() >= policy.min_budget_threshold;
                    let expected = if !budget_ok {
                        Qualification::LimitedBudget
                    } else if intention == Intention::Start && start != StartTime::Later {
                        Qualification::Strong
                    } else {
                        Qualification::Warm
                    };

                    assert_eq!(
                        got, expected,
                        "budget={:?} start={:?} intention={:?}",
                        budget, start, intention
                    );
                }
            }
        }

        assert_eq!(seen, 30);
    }

    #[test]
    fn raised_threshold_shrinks_qualifying_tiers() {
        // a country that only counts 50k+ budgets as qualified
        let policy = ScoringPolicy {
            min_budget_threshold: 50_000,
        };
        assert_eq!(
            qualify(
                BudgetRange::Standard,
                StartTime::Asap,
                Intention::Start,
                &policy
            ),
            Qualification::LimitedBudget
        );
        assert_eq!(
            qualify(BudgetRange::High, StartTime::Asap, Intention::Start, &policy),
            Qualification::Strong
        );
    }

    #[test]
    fn label_round_trip() {
        for q in [
            Qualification::Strong,
            Qualification::Warm,
            Qualification::LimitedBudget,
        ] {
            assert_eq!(Qualification::from_label(q.label()), q);
        }
    }
}
