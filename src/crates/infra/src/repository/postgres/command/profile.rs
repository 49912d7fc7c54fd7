use super::db_data::profile::{self, ActiveModel, Entity, Model};
use async_trait::async_trait;
use domain::profile::{Profile, ProfileError, ProfileRepository};
use domain::value::ProfileId;
use sea_orm::*;

#[derive(Clone)]
pub struct ProfileRepositoryImpl {
    db: sea_orm::DbConn,
}

impl ProfileRepositoryImpl {
    pub fn new(db: sea_orm::DbConn) -> Self {
        Self { db }
    }
}

fn map_db_error(e: DbErr) -> ProfileError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => ProfileError::UsernameTaken(msg),
        _ => ProfileError::DbErr(e.to_string()),
    }
}

#[async_trait]
impl ProfileRepository for ProfileRepositoryImpl {
    async fn find_by_id(&self, id: ProfileId) -> Result<Option<Profile>, ProfileError> {
        let row: Option<Model> = Entity::find_by_id(id.as_i64())
            .one(&self.db)
            .await
            .map_err(map_db_error)?;
        Ok(row.map(|r| r.into()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Profile>, ProfileError> {
        let row: Option<Model> = Entity::find()
            .filter(profile::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_error)?;
        Ok(row.map(|r| r.into()))
    }

    async fn save(&self, profile: Profile) -> Result<Profile, ProfileError> {
        let id = profile.id.as_i64();
        let existing: Option<Model> = Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_error)?;

        let active_model: ActiveModel = profile.clone().into();
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
                update_model.favorites = NotSet;
                update_model.update(&self.db).await.map_err(map_db_error)?;
            }
        }
        Ok(profile)
    }
}
