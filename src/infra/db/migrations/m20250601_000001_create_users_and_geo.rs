//! Migration: countries, cities and user accounts.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Countries::Table)
                    .col(ColumnDef::new(Countries::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Countries::Name).string().not_null())
                    .col(
                        ColumnDef::new(Countries::Code)
                            .string_len(3)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Countries::CurrencySymbol).string().not_null())
                    .col(
                        ColumnDef::new(Countries::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Countries::MinBudgetThreshold)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Countries::SubscriptionPrice)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Countries::ContactPrice).integer().not_null())
                    .col(
                        ColumnDef::new(Countries::CasierDelayWeeks)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Countries::ReminderDays).integer().not_null())
                    .col(
                        ColumnDef::new(Countries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Countries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Cities::Table)
                    .col(ColumnDef::new(Cities::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Cities::CountryId).uuid().not_null())
                    .col(ColumnDef::new(Cities::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cities_country")
                            .from(Cities::Table, Cities::CountryId)
                            .to(Countries::Table, Countries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(ColumnDef::new(Users::Phone).string().not_null())
                    .col(ColumnDef::new(Users::Role).string_len(10).not_null())
                    .col(ColumnDef::new(Users::CountryId).uuid().null())
                    .col(
                        ColumnDef::new(Users::IsSuperuser)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_country")
                            .from(Users::Table, Users::CountryId)
                            .to(Countries::Table, Countries::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Countries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Countries {
    Table,
    Id,
    Name,
    Code,
    CurrencySymbol,
    IsActive,
    MinBudgetThreshold,
    SubscriptionPrice,
    ContactPrice,
    CasierDelayWeeks,
    ReminderDays,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Cities {
    Table,
    Id,
    CountryId,
    Name,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    Phone,
    Role,
    CountryId,
    IsSuperuser,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
