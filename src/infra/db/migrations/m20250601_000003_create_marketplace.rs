//! Migration: course requests, contact unlocks, reviews.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseRequests::Table)
                    .col(
                        ColumnDef::new(CourseRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseRequests::ParentId).uuid().not_null())
                    .col(ColumnDef::new(CourseRequests::LevelId).uuid().null())
                    .col(ColumnDef::new(CourseRequests::CityId).uuid().null())
                    .col(ColumnDef::new(CourseRequests::Quartier).string().not_null())
                    .col(ColumnDef::new(CourseRequests::Frequency).string().not_null())
                    .col(
                        ColumnDef::new(CourseRequests::IsOnline)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CourseRequests::BudgetRange)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseRequests::StartTime)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseRequests::Intention)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseRequests::Description).text().not_null())
                    .col(
                        ColumnDef::new(CourseRequests::Qualification)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseRequests::Status)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_requests_parent")
                            .from(CourseRequests::Table, CourseRequests::ParentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_requests_status")
                    .table(CourseRequests::Table)
                    .col(CourseRequests::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RequestSubjects::Table)
                    .col(ColumnDef::new(RequestSubjects::RequestId).uuid().not_null())
                    .col(ColumnDef::new(RequestSubjects::SubjectId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(RequestSubjects::RequestId)
                            .col(RequestSubjects::SubjectId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_request_subjects_request")
                            .from(RequestSubjects::Table, RequestSubjects::RequestId)
                            .to(CourseRequests::Table, CourseRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContactUnlocks::Table)
                    .col(
                        ColumnDef::new(ContactUnlocks::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContactUnlocks::ParentId).uuid().not_null())
                    .col(ColumnDef::new(ContactUnlocks::TutorId).uuid().not_null())
                    .col(ColumnDef::new(ContactUnlocks::AmountPaid).integer().not_null())
                    .col(
                        ColumnDef::new(ContactUnlocks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contact_unlocks_parent")
                            .from(ContactUnlocks::Table, ContactUnlocks::ParentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contact_unlocks_tutor")
                            .from(ContactUnlocks::Table, ContactUnlocks::TutorId)
                            .to(TutorProfiles::Table, TutorProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A parent buys a given tutor's contact at most once; concurrent
        // purchases fall back on this constraint.
        manager
            .create_index(
                Index::create()
                    .name("idx_contact_unlocks_pair")
                    .table(ContactUnlocks::Table)
                    .col(ContactUnlocks::ParentId)
                    .col(ContactUnlocks::TutorId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .col(ColumnDef::new(Reviews::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Reviews::TutorId).uuid().not_null())
                    .col(ColumnDef::new(Reviews::AuthorId).uuid().not_null())
                    .col(ColumnDef::new(Reviews::Rating).small_integer().not_null())
                    .col(ColumnDef::new(Reviews::Comment).text().not_null())
                    .col(
                        ColumnDef::new(Reviews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_tutor")
                            .from(Reviews::Table, Reviews::TutorId)
                            .to(TutorProfiles::Table, TutorProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_author")
                            .from(Reviews::Table, Reviews::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One review per (tutor, author)
        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_tutor_author")
                    .table(Reviews::Table)
                    .col(Reviews::TutorId)
                    .col(Reviews::AuthorId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContactUnlocks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RequestSubjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CourseRequests {
    Table,
    Id,
    ParentId,
    LevelId,
    CityId,
    Quartier,
    Frequency,
    IsOnline,
    BudgetRange,
    StartTime,
    Intention,
    Description,
    Qualification,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum RequestSubjects {
    Table,
    RequestId,
    SubjectId,
}

#[derive(Iden)]
enum ContactUnlocks {
    Table,
    Id,
    ParentId,
    TutorId,
    AmountPaid,
    CreatedAt,
}

#[derive(Iden)]
enum Reviews {
    Table,
    Id,
    TutorId,
    AuthorId,
    Rating,
    Comment,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum TutorProfiles {
    Table,
    Id,
}
