//! Teaching catalog: subjects and school levels.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A subject that can be taught (Maths, Piano, ...)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    /// True for school subjects, false for hobbies
    pub is_academic: bool,
}

/// School cycle a level belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LevelCategory {
    Primaire,
    College,
    Lycee,
    Superieur,
}

impl LevelCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelCategory::Primaire => "primaire",
            LevelCategory::College => "college",
            LevelCategory::Lycee => "lycee",
            LevelCategory::Superieur => "superieur",
        }
    }
}

impl From<&str> for LevelCategory {
    fn from(s: &str) -> Self {
        match s {
            "primaire" => LevelCategory::Primaire,
            "college" => LevelCategory::College,
            "lycee" => LevelCategory::Lycee,
            _ => LevelCategory::Superieur,
        }
    }
}

/// A school level (CM2, 3ème, Terminale...), sorted by `sort_order`
/// so CP comes before CE1 regardless of name.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Level {
    pub id: Uuid,
    pub name: String,
    pub category: LevelCategory,
    pub sort_order: i32,
}
