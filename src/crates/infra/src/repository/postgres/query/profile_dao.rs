use crate::repository::postgres::command::db_data::{favorite_user, profile};
use application::query::dao::ProfileDao;
use application::query::dto::profile_card::{NearbyUser, ProfileCard};
use application::query::QueryError;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::*;
use std::collections::HashMap;

pub struct ProfileDaoImpl {
    db: DatabaseConnection,
}

impl ProfileDaoImpl {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[inline]
fn map_db_error(e: DbErr) -> QueryError {
    QueryError::DbError(e.to_string())
}

fn to_card(model: profile::Model) -> ProfileCard {
    ProfileCard {
        id: model.id,
        username: model.username,
        full_name: model.full_name,
        short_description: model.short_description,
        avatar_url: model.avatar_url,
        city: model.city,
        country: model.country,
        favorites: model.favorites,
        last_active: model.last_active,
    }
}

/// 附近用户查询的行结构，distance_km 由 SQL 里的球面距离公式算出
#[derive(Debug, FromQueryResult)]
struct NearbyRow {
    id: i64,
    username: String,
    full_name: Option<String>,
    short_description: Option<String>,
    avatar_url: Option<String>,
    city: Option<String>,
    country: Option<String>,
    favorites: i32,
    last_active: NaiveDateTime,
    distance_km: f64,
}

#[async_trait]
impl ProfileDao for ProfileDaoImpl {
    async fn get_by_username(&self, username: &str) -> Result<Option<ProfileCard>, QueryError> {
        let row = profile::Entity::find()
            .filter(profile::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_error)?;
        Ok(row.map(to_card))
    }

    async fn search_by_username(
        &self,
        query: &str,
        limit: i32,
    ) -> Result<Vec<ProfileCard>, QueryError> {
        let pattern = format!("%{}%", query.to_lowercase());
        let rows = profile::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col((
                    profile::Entity,
                    profile::Column::Username,
                ))))
                .like(pattern),
            )
            .order_by_asc(profile::Column::Username)
            .limit(limit as u64)
            .all(&self.db)
            .await
            .map_err(map_db_error)?;
        Ok(rows.into_iter().map(to_card).collect())
    }

    async fn get_nearby(
        &self,
        viewer_id: i64,
        limit: i32,
    ) -> Result<Vec<NearbyUser>, QueryError> {
        // 查看者自己最近上报的位置是距离计算的原点
        let viewer = profile::Entity::find_by_id(viewer_id)
            .one(&self.db)
            .await
            .map_err(map_db_error)?;
        let (lat, lng) = match viewer.and_then(|v| v.latitude.zip(v.longitude)) {
            Some(origin) => origin,
            // 从未上报过位置，没有可排序的原点
            None => return Ok(Vec::new()),
        };

        // Haversine 球面距离（公里），least 防浮点误差越过 acos 定义域
        let sql = r#"
            SELECT p.id, p.username, p.full_name, p.short_description, p.avatar_url,
                   p.city, p.country, p.favorites, p.last_active,
                   6371.0 * acos(least(1.0,
                       cos(radians($1)) * cos(radians(p.latitude))
                       * cos(radians(p.longitude) - radians($2))
                       + sin(radians($1)) * sin(radians(p.latitude))
                   )) AS distance_km
              FROM profiles p
             WHERE p.id <> $3
               AND p.latitude IS NOT NULL
               AND p.longitude IS NOT NULL
             ORDER BY distance_km ASC
             LIMIT $4
        "#;
        let rows = NearbyRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [lat.into(), lng.into(), viewer_id.into(), (limit as i64).into()],
        ))
        .all(&self.db)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| NearbyUser {
                profile: ProfileCard {
                    id: row.id,
                    username: row.username,
                    full_name: row.full_name,
                    short_description: row.short_description,
                    avatar_url: row.avatar_url,
                    city: row.city,
                    country: row.country,
                    favorites: row.favorites,
                    last_active: row.last_active,
                },
                distance_km: row.distance_km,
            })
            .collect())
    }

    async fn count_all(&self) -> Result<i64, QueryError> {
        let count = profile::Entity::find()
            .count(&self.db)
            .await
            .map_err(map_db_error)?;
        Ok(count as i64)
    }

    async fn last_active_of(&self, user_id: i64) -> Result<Option<NaiveDateTime>, QueryError> {
        let row = profile::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(map_db_error)?;
        Ok(row.map(|r| r.last_active))
    }

    async fn get_favorited_by(&self, owner_id: i64) -> Result<Vec<ProfileCard>, QueryError> {
        let favorites = favorite_user::Entity::find()
            .filter(favorite_user::Column::OwnerId.eq(owner_id))
            .order_by_desc(favorite_user::Column::FavoritedAt)
            .all(&self.db)
            .await
            .map_err(map_db_error)?;
        if favorites.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = favorites.iter().map(|f| f.user_id).collect();
        let profiles = profile::Entity::find()
            .filter(profile::Column::Id.is_in(ids.clone()))
            .all(&self.db)
            .await
            .map_err(map_db_error)?;

        // 保持收藏时间的排序
        let mut by_id: HashMap<i64, profile::Model> =
            profiles.into_iter().map(|p| (p.id, p)).collect();
        Ok(ids
            .into_iter()
            .filter_map(|id| by_id.remove(&id))
            .map(to_card)
            .collect())
    }
}
