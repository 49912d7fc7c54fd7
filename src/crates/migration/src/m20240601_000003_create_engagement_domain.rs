use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create liked table
        manager
            .create_table(
                Table::create()
                    .table(Liked::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Liked::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Liked::OwnerId).big_integer().not_null())
                    .col(ColumnDef::new(Liked::PlaceId).big_integer().not_null())
                    .col(ColumnDef::new(Liked::LikedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_liked_place")
                            .from(Liked::Table, Liked::PlaceId)
                            .to(Places::Table, Places::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一个用户对同一个推荐只能有一条点赞记录；
        // 重复插入在这里被数据库挡下，由双写协调器补偿计数器
        manager
            .create_index(
                Index::create()
                    .name("idx_liked_owner_place")
                    .table(Liked::Table)
                    .col(Liked::OwnerId)
                    .col(Liked::PlaceId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_liked_place_id")
                    .table(Liked::Table)
                    .col(Liked::PlaceId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Create favorite_place table
        manager
            .create_table(
                Table::create()
                    .table(FavoritePlace::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FavoritePlace::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FavoritePlace::OwnerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FavoritePlace::PlaceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FavoritePlace::FavoritedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_place_place")
                            .from(FavoritePlace::Table, FavoritePlace::PlaceId)
                            .to(Places::Table, Places::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_favorite_place_owner_place")
                    .table(FavoritePlace::Table)
                    .col(FavoritePlace::OwnerId)
                    .col(FavoritePlace::PlaceId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_favorite_place_place_id")
                    .table(FavoritePlace::Table)
                    .col(FavoritePlace::PlaceId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Create favorite_user table
        manager
            .create_table(
                Table::create()
                    .table(FavoriteUser::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FavoriteUser::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FavoriteUser::OwnerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FavoriteUser::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FavoriteUser::FavoritedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_user_target")
                            .from(FavoriteUser::Table, FavoriteUser::UserId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_favorite_user_owner_user")
                    .table(FavoriteUser::Table)
                    .col(FavoriteUser::OwnerId)
                    .col(FavoriteUser::UserId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_favorite_user_user_id")
                    .table(FavoriteUser::Table)
                    .col(FavoriteUser::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order
        manager
            .drop_table(Table::drop().table(FavoriteUser::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FavoritePlace::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Liked::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Liked {
    Table,
    Id,
    OwnerId,
    PlaceId,
    LikedAt,
}

#[derive(DeriveIden)]
enum FavoritePlace {
    Table,
    Id,
    OwnerId,
    PlaceId,
    FavoritedAt,
}

#[derive(DeriveIden)]
enum FavoriteUser {
    Table,
    Id,
    OwnerId,
    UserId,
    FavoritedAt,
}

#[derive(DeriveIden)]
enum Places {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
}
