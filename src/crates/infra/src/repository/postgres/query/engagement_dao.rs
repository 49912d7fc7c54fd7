use crate::repository::postgres::command::db_data::{favorite_place, liked, place};
use application::query::dao::EngagementDao;
use application::query::dto::engagement_status::EngagementStatus;
use application::query::QueryError;
use async_trait::async_trait;
use sea_orm::*;

pub struct EngagementDaoImpl {
    db: DatabaseConnection,
}

impl EngagementDaoImpl {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[inline]
fn map_db_error(e: DbErr) -> QueryError {
    QueryError::DbError(e.to_string())
}

#[async_trait]
impl EngagementDao for EngagementDaoImpl {
    async fn get_place_status(
        &self,
        viewer_id: i64,
        place_id: i64,
    ) -> Result<EngagementStatus, QueryError> {
        let place_row = place::Entity::find_by_id(place_id)
            .one(&self.db)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| QueryError::NotFound(format!("place {}", place_id)))?;

        let liked = liked::Entity::find()
            .filter(liked::Column::OwnerId.eq(viewer_id))
            .filter(liked::Column::PlaceId.eq(place_id))
            .one(&self.db)
            .await
            .map_err(map_db_error)?
            .is_some();

        let favorite = favorite_place::Entity::find()
            .filter(favorite_place::Column::OwnerId.eq(viewer_id))
            .filter(favorite_place::Column::PlaceId.eq(place_id))
            .one(&self.db)
            .await
            .map_err(map_db_error)?
            .is_some();

        // 收藏人数直接数关系行（基准真值），点赞数用反规范化列
        let follows = favorite_place::Entity::find()
            .filter(favorite_place::Column::PlaceId.eq(place_id))
            .count(&self.db)
            .await
            .map_err(map_db_error)?;

        Ok(EngagementStatus {
            favorite,
            liked,
            likes: place_row.likes,
            follows: follows as i32,
        })
    }
}
