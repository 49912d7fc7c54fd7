use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create categories table
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .col(
                        ColumnDef::new(Categories::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Categories::ParentId).big_integer().null())
                    .col(
                        ColumnDef::new(Categories::IsChild)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Categories::CreatorId).big_integer().null())
                    .col(ColumnDef::new(Categories::CreatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_categories_parent")
                            .from(Categories::Table, Categories::ParentId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create places table with denormalized counters
        manager
            .create_table(
                Table::create()
                    .table(Places::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Places::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Places::Name).string().not_null())
                    .col(ColumnDef::new(Places::Comment).string().not_null())
                    .col(ColumnDef::new(Places::CategoryId).big_integer().null())
                    .col(ColumnDef::new(Places::CreatedBy).big_integer().not_null())
                    .col(
                        ColumnDef::new(Places::Online)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Places::City).string().null())
                    .col(ColumnDef::new(Places::Contact).string().null())
                    .col(ColumnDef::new(Places::Link).string().null())
                    .col(
                        ColumnDef::new(Places::Tags)
                            .array(ColumnType::String(None))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Places::Likes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Places::Favorites)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Places::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Places::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_places_category")
                            .from(Places::Table, Places::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_places_category_id")
                    .table(Places::Table)
                    .col(Places::CategoryId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_places_created_by")
                    .table(Places::Table)
                    .col(Places::CreatedBy)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order
        manager
            .drop_table(Table::drop().table(Places::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    Slug,
    ParentId,
    IsChild,
    CreatorId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Places {
    Table,
    Id,
    Name,
    Comment,
    CategoryId,
    CreatedBy,
    Online,
    City,
    Contact,
    Link,
    Tags,
    Likes,
    Favorites,
    CreatedAt,
    UpdatedAt,
}
