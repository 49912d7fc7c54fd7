use super::db_data::{favorite_place, favorite_user, liked, place, profile};
use async_trait::async_trait;
use chrono::Utc;
use domain::engagement::{ParentKind, RelationKind, RelationRow, RelationStore, StoreError};
use domain::value::{ProfileId, RelationId};
use sea_orm::sea_query::Expr;
use sea_orm::*;

/// 关系存储的生产实现。
///
/// 关系表的增删和父实体计数列的更新是各自独立的语句，
/// 故意不放进同一个事务：一致性由上层的双写协调器通过补偿保证。
/// (owner, target) 的唯一约束在迁移里建，重复插入在这里映射为 Conflict。
#[derive(Clone)]
pub struct SeaOrmRelationStore {
    db: sea_orm::DbConn,
}

impl SeaOrmRelationStore {
    pub fn new(db: sea_orm::DbConn) -> Self {
        Self { db }
    }
}

fn map_db_error(e: DbErr) -> StoreError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => StoreError::Conflict(msg),
        _ => StoreError::Db(e.to_string()),
    }
}

#[async_trait]
impl RelationStore for SeaOrmRelationStore {
    async fn insert_relation_row(
        &self,
        kind: RelationKind,
        owner_id: ProfileId,
        target_id: i64,
    ) -> Result<RelationRow, StoreError> {
        let now = Utc::now().naive_utc();
        let owner = owner_id.as_i64();
        let row_id = match kind {
            RelationKind::Liked => {
                let model = liked::ActiveModel {
                    id: NotSet,
                    owner_id: Set(owner),
                    place_id: Set(target_id),
                    liked_at: Set(now),
                };
                model.insert(&self.db).await.map_err(map_db_error)?.id
            }
            RelationKind::FavoritePlace => {
                let model = favorite_place::ActiveModel {
                    id: NotSet,
                    owner_id: Set(owner),
                    place_id: Set(target_id),
                    favorited_at: Set(now),
                };
                model.insert(&self.db).await.map_err(map_db_error)?.id
            }
            RelationKind::FavoriteUser => {
                let model = favorite_user::ActiveModel {
                    id: NotSet,
                    owner_id: Set(owner),
                    user_id: Set(target_id),
                    favorited_at: Set(now),
                };
                model.insert(&self.db).await.map_err(map_db_error)?.id
            }
        };
        Ok(RelationRow {
            id: RelationId::from(row_id),
            kind,
            owner_id,
            target_id,
            created_at: now,
        })
    }

    async fn delete_relation_row(
        &self,
        kind: RelationKind,
        owner_id: ProfileId,
        target_id: i64,
    ) -> Result<(), StoreError> {
        let owner = owner_id.as_i64();
        match kind {
            RelationKind::Liked => {
                liked::Entity::delete_many()
                    .filter(liked::Column::OwnerId.eq(owner))
                    .filter(liked::Column::PlaceId.eq(target_id))
                    .exec(&self.db)
                    .await
                    .map_err(map_db_error)?;
            }
            RelationKind::FavoritePlace => {
                favorite_place::Entity::delete_many()
                    .filter(favorite_place::Column::OwnerId.eq(owner))
                    .filter(favorite_place::Column::PlaceId.eq(target_id))
                    .exec(&self.db)
                    .await
                    .map_err(map_db_error)?;
            }
            RelationKind::FavoriteUser => {
                favorite_user::Entity::delete_many()
                    .filter(favorite_user::Column::OwnerId.eq(owner))
                    .filter(favorite_user::Column::UserId.eq(target_id))
                    .exec(&self.db)
                    .await
                    .map_err(map_db_error)?;
            }
        }
        Ok(())
    }

    async fn update_counter(
        &self,
        kind: RelationKind,
        target_id: i64,
        new_value: i32,
    ) -> Result<(), StoreError> {
        // 整体写入调用方算好的新值，不做原子自增：
        // 六个互动操作的契约就是「把计数写成 current + delta」
        let rows_affected = match kind.parent() {
            ParentKind::Place => {
                let column = match kind {
                    RelationKind::Liked => place::Column::Likes,
                    _ => place::Column::Favorites,
                };
                place::Entity::update_many()
                    .col_expr(column, Expr::value(new_value))
                    .filter(place::Column::Id.eq(target_id))
                    .exec(&self.db)
                    .await
                    .map_err(map_db_error)?
                    .rows_affected
            }
            ParentKind::Profile => profile::Entity::update_many()
                .col_expr(profile::Column::Favorites, Expr::value(new_value))
                .filter(profile::Column::Id.eq(target_id))
                .exec(&self.db)
                .await
                .map_err(map_db_error)?
                .rows_affected,
        };
        if rows_affected == 0 {
            return Err(StoreError::NotFound(format!(
                "{:?} {} 不存在",
                kind.parent(),
                target_id
            )));
        }
        Ok(())
    }

    async fn count_relation_rows(
        &self,
        kind: RelationKind,
        target_id: i64,
    ) -> Result<i64, StoreError> {
        let count = match kind {
            RelationKind::Liked => liked::Entity::find()
                .filter(liked::Column::PlaceId.eq(target_id))
                .count(&self.db)
                .await
                .map_err(map_db_error)?,
            RelationKind::FavoritePlace => favorite_place::Entity::find()
                .filter(favorite_place::Column::PlaceId.eq(target_id))
                .count(&self.db)
                .await
                .map_err(map_db_error)?,
            RelationKind::FavoriteUser => favorite_user::Entity::find()
                .filter(favorite_user::Column::UserId.eq(target_id))
                .count(&self.db)
                .await
                .map_err(map_db_error)?,
        };
        Ok(count as i64)
    }

    async fn read_counter(
        &self,
        kind: RelationKind,
        target_id: i64,
    ) -> Result<Option<i32>, StoreError> {
        match kind.parent() {
            ParentKind::Place => {
                let row = place::Entity::find_by_id(target_id)
                    .one(&self.db)
                    .await
                    .map_err(map_db_error)?;
                Ok(row.map(|r| match kind {
                    RelationKind::Liked => r.likes,
                    _ => r.favorites,
                }))
            }
            ParentKind::Profile => {
                let row = profile::Entity::find_by_id(target_id)
                    .one(&self.db)
                    .await
                    .map_err(map_db_error)?;
                Ok(row.map(|r| r.favorites))
            }
        }
    }
}
