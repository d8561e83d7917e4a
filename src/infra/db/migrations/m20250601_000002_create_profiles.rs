//! Migration: teaching catalog, tutor and parent profiles.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .col(ColumnDef::new(Subjects::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Subjects::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Subjects::IsAcademic)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Levels::Table)
                    .col(ColumnDef::new(Levels::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Levels::Name).string().not_null())
                    .col(ColumnDef::new(Levels::Category).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Levels::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TutorProfiles::Table)
                    .col(
                        ColumnDef::new(TutorProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TutorProfiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(TutorProfiles::Bio).text().not_null())
                    .col(ColumnDef::new(TutorProfiles::Photo).string().null())
                    .col(ColumnDef::new(TutorProfiles::CityId).uuid().null())
                    .col(ColumnDef::new(TutorProfiles::Quartier).string().not_null())
                    .col(ColumnDef::new(TutorProfiles::CniDocument).string().null())
                    .col(ColumnDef::new(TutorProfiles::CasierDocument).string().null())
                    .col(
                        ColumnDef::new(TutorProfiles::DiplomasDocument)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TutorProfiles::IsOnlineClass)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(TutorProfiles::IsHomeClass)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(TutorProfiles::Status).string_len(20).not_null())
                    .col(ColumnDef::new(TutorProfiles::AdminNotes).text().not_null())
                    .col(
                        ColumnDef::new(TutorProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TutorProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TutorProfiles::ValidatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tutor_profiles_user")
                            .from(TutorProfiles::Table, TutorProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Directory queries filter on status constantly
        manager
            .create_index(
                Index::create()
                    .name("idx_tutor_profiles_status")
                    .table(TutorProfiles::Table)
                    .col(TutorProfiles::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TutorSubjects::Table)
                    .col(ColumnDef::new(TutorSubjects::TutorId).uuid().not_null())
                    .col(ColumnDef::new(TutorSubjects::SubjectId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(TutorSubjects::TutorId)
                            .col(TutorSubjects::SubjectId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tutor_subjects_tutor")
                            .from(TutorSubjects::Table, TutorSubjects::TutorId)
                            .to(TutorProfiles::Table, TutorProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tutor_subjects_subject")
                            .from(TutorSubjects::Table, TutorSubjects::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TutorLevels::Table)
                    .col(ColumnDef::new(TutorLevels::TutorId).uuid().not_null())
                    .col(ColumnDef::new(TutorLevels::LevelId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(TutorLevels::TutorId)
                            .col(TutorLevels::LevelId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tutor_levels_tutor")
                            .from(TutorLevels::Table, TutorLevels::TutorId)
                            .to(TutorProfiles::Table, TutorProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tutor_levels_level")
                            .from(TutorLevels::Table, TutorLevels::LevelId)
                            .to(Levels::Table, Levels::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ParentProfiles::Table)
                    .col(
                        ColumnDef::new(ParentProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ParentProfiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ParentProfiles::IsPhoneVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ParentProfiles::Address).string().not_null())
                    .col(
                        ColumnDef::new(ParentProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParentProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parent_profiles_user")
                            .from(ParentProfiles::Table, ParentProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParentProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TutorLevels::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TutorSubjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TutorProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Levels::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Subjects {
    Table,
    Id,
    Name,
    IsAcademic,
}

#[derive(Iden)]
enum Levels {
    Table,
    Id,
    Name,
    Category,
    SortOrder,
}

#[derive(Iden)]
enum TutorProfiles {
    Table,
    Id,
    UserId,
    Bio,
    Photo,
    CityId,
    Quartier,
    CniDocument,
    CasierDocument,
    DiplomasDocument,
    IsOnlineClass,
    IsHomeClass,
    Status,
    AdminNotes,
    CreatedAt,
    UpdatedAt,
    ValidatedAt,
}

#[derive(Iden)]
enum TutorSubjects {
    Table,
    TutorId,
    SubjectId,
}

#[derive(Iden)]
enum TutorLevels {
    Table,
    TutorId,
    LevelId,
}

#[derive(Iden)]
enum ParentProfiles {
    Table,
    Id,
    UserId,
    IsPhoneVerified,
    Address,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
