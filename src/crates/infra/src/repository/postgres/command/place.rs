use super::db_data::place::{ActiveModel, Entity, Model};
use async_trait::async_trait;
use domain::place::{Place, PlaceError, PlaceRepository};
use domain::value::PlaceId;
use sea_orm::*;

#[derive(Clone)]
pub struct PlaceRepositoryImpl {
    db: sea_orm::DbConn,
}

impl PlaceRepositoryImpl {
    pub fn new(db: sea_orm::DbConn) -> Self {
        Self { db }
    }
}

#[inline]
fn map_db_error(e: DbErr) -> PlaceError {
    PlaceError::DbErr(e.to_string())
}

#[async_trait]
impl PlaceRepository for PlaceRepositoryImpl {
    async fn find_by_id(&self, id: PlaceId) -> Result<Option<Place>, PlaceError> {
        let row: Option<Model> = Entity::find_by_id(id.as_i64())
            .one(&self.db)
            .await
            .map_err(map_db_error)?;
        Ok(row.map(|r| r.into()))
    }

    async fn save(&self, place: Place) -> Result<Place, PlaceError> {
        let id = place.id.as_i64();
        let existing: Option<Model> = Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_error)?;

        let active_model: ActiveModel = place.clone().into();
        match existing {
            None => {
                active_model
                    .insert(&self.db)
                    .await
                    .map_err(map_db_error)?;
            }
            Some(_) => {
                let mut update_model = active_model;
                // 创建时间和计数列保持库里的值
                update_model.created_at = NotSet;
                update_model.likes = NotSet;
                update_model.favorites = NotSet;
                update_model.update(&self.db).await.map_err(map_db_error)?;
            }
        }
        Ok(place)
    }

    async fn delete(&self, id: PlaceId) -> Result<(), PlaceError> {
        let result = Entity::delete_by_id(id.as_i64())
            .exec(&self.db)
            .await
            .map_err(map_db_error)?;
        if result.rows_affected == 0 {
            return Err(PlaceError::NotFoundErr(format!("place {}", id)));
        }
        // 关系行由外键级联删除
        Ok(())
    }
}
