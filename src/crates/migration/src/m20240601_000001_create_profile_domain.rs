use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create profiles table
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profiles::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Profiles::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Profiles::FullName).string().null())
                    .col(ColumnDef::new(Profiles::ShortDescription).string().null())
                    .col(ColumnDef::new(Profiles::AvatarUrl).string().null())
                    .col(ColumnDef::new(Profiles::Website).string().null())
                    .col(ColumnDef::new(Profiles::City).string().null())
                    .col(ColumnDef::new(Profiles::Country).string().null())
                    .col(ColumnDef::new(Profiles::Address).string().null())
                    .col(ColumnDef::new(Profiles::Profession).string().null())
                    .col(ColumnDef::new(Profiles::Education).string().null())
                    .col(ColumnDef::new(Profiles::Hobbies).string().null())
                    .col(ColumnDef::new(Profiles::Belief).string().null())
                    .col(ColumnDef::new(Profiles::Gender).string().null())
                    .col(ColumnDef::new(Profiles::Dob).date().null())
                    .col(ColumnDef::new(Profiles::Latitude).double().null())
                    .col(ColumnDef::new(Profiles::Longitude).double().null())
                    .col(
                        ColumnDef::new(Profiles::Favorites)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Profiles::LastActive).date_time().not_null())
                    .col(ColumnDef::new(Profiles::LastSignal).date_time().null())
                    .col(ColumnDef::new(Profiles::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Profiles::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Index for username lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_profiles_username")
                    .table(Profiles::Table)
                    .col(Profiles::Username)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
    Username,
    FullName,
    ShortDescription,
    AvatarUrl,
    Website,
    City,
    Country,
    Address,
    Profession,
    Education,
    Hobbies,
    Belief,
    Gender,
    Dob,
    Latitude,
    Longitude,
    Favorites,
    LastActive,
    LastSignal,
    CreatedAt,
    UpdatedAt,
}
