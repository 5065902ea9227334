use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // customers
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Customers::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Customers::Phone)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Customers::PasswordHash).text().not_null())
                    .col(
                        ColumnDef::new(Customers::FirstName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Customers::LastName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Customers::DateOfBirth).date())
                    .col(
                        ColumnDef::new(Customers::EmergencyContactName)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Customers::EmergencyContactPhone)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Customers::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Customers::LastLoginAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Customers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Customers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // pharmacists
        manager
            .create_table(
                Table::create()
                    .table(Pharmacists::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pharmacists::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Pharmacists::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Pharmacists::Phone)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Pharmacists::PasswordHash).text().not_null())
                    .col(
                        ColumnDef::new(Pharmacists::FirstName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Pharmacists::LastName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Pharmacists::DateOfBirth).date())
                    .col(
                        ColumnDef::new(Pharmacists::PharmacistRole)
                            .string_len(32)
                            .not_null()
                            .default("PHARMACIST"),
                    )
                    .col(
                        ColumnDef::new(Pharmacists::LicenseNumber)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Pharmacists::LicenseState)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Pharmacists::LicenseExpiryDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Pharmacists::AssignedBy).uuid())
                    .col(
                        ColumnDef::new(Pharmacists::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Pharmacists::LastLoginAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Pharmacists::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Pharmacists::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // admins
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Admins::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Admins::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Admins::Phone)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Admins::PasswordHash).text().not_null())
                    .col(ColumnDef::new(Admins::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Admins::LastName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Admins::AdminLevel)
                            .string_len(32)
                            .not_null()
                            .default("STANDARD"),
                    )
                    .col(
                        ColumnDef::new(Admins::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Admins::LastLoginAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Admins::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Admins::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_customers_email")
                    .table(Customers::Table)
                    .col(Customers::Email)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_pharmacists_email")
                    .table(Pharmacists::Table)
                    .col(Pharmacists::Email)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_admins_email")
                    .table(Admins::Table)
                    .col(Admins::Email)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pharmacists::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Customers {
    Table,
    Id,
    Email,
    Phone,
    PasswordHash,
    FirstName,
    LastName,
    DateOfBirth,
    EmergencyContactName,
    EmergencyContactPhone,
    IsActive,
    LastLoginAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Pharmacists {
    Table,
    Id,
    Email,
    Phone,
    PasswordHash,
    FirstName,
    LastName,
    DateOfBirth,
    PharmacistRole,
    LicenseNumber,
    LicenseState,
    LicenseExpiryDate,
    AssignedBy,
    IsActive,
    LastLoginAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Admins {
    Table,
    Id,
    Email,
    Phone,
    PasswordHash,
    FirstName,
    LastName,
    AdminLevel,
    IsActive,
    LastLoginAt,
    CreatedAt,
    UpdatedAt,
}
