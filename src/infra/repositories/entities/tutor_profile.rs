//! SeaORM entity for the `tutor_profiles` table.
//!
//! Subjects and levels live in junction tables; the repository assembles
//! them into the domain aggregate.

use sea_orm::entity::prelude::*;

use crate::domain::{TutorProfile, TutorStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tutor_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub bio: String,
    pub photo: Option<String>,
    pub city_id: Option<Uuid>,
    pub quartier: String,
    pub cni_document: Option<String>,
    pub casier_document: Option<String>,
    pub diplomas_document: Option<String>,
    pub is_online_class: bool,
    pub is_home_class: bool,
    pub status: String,
    pub admin_notes: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub validated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Attach junction-table sets and convert to the domain aggregate.
    pub fn into_domain(self, subject_ids: Vec<Uuid>, level_ids: Vec<Uuid>) -> TutorProfile {
        TutorProfile {
            id: self.id,
            user_id: self.user_id,
            bio: self.bio,
            photo: self.photo,
            city_id: self.city_id,
            quartier: self.quartier,
            cni_document: self.cni_document,
            casier_document: self.casier_document,
            diplomas_document: self.diplomas_document,
            subject_ids,
            level_ids,
            is_online_class: self.is_online_class,
            is_home_class: self.is_home_class,
            status: TutorStatus::from(self.status.as_str()),
            admin_notes: self.admin_notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
            validated_at: self.validated_at,
        }
    }
}
