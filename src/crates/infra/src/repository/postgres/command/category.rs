use super::db_data::category::{self, ActiveModel, Entity, Model};
use async_trait::async_trait;
use domain::category::{Category, CategoryError, CategoryRepository};
use domain::value::CategoryId;
use sea_orm::*;

#[derive(Clone)]
pub struct CategoryRepositoryImpl {
    db: sea_orm::DbConn,
}

impl CategoryRepositoryImpl {
    pub fn new(db: sea_orm::DbConn) -> Self {
        Self { db }
    }
}

#[inline]
fn map_db_error(e: DbErr) -> CategoryError {
    CategoryError::DbErr(e.to_string())
}

#[async_trait]
impl CategoryRepository for CategoryRepositoryImpl {
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, CategoryError> {
        let row: Option<Model> = Entity::find_by_id(id.as_i64())
            .one(&self.db)
            .await
            .map_err(map_db_error)?;
        Ok(row.map(|r| r.into()))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, CategoryError> {
        let row: Option<Model> = Entity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_error)?;
        Ok(row.map(|r| r.into()))
    }

    async fn save(&self, category: Category) -> Result<Category, CategoryError> {
        let id = category.id.as_i64();
        let existing: Option<Model> = Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_error)?;

        let active_model: ActiveModel = category.clone().into();
        match existing {
            None => {
                active_model
                    .insert(&self.db)
                    .await
                    .map_err(map_db_error)?;
            }
            Some(_) => {
                let mut update_model = active_model;
                update_model.created_at = NotSet;
                update_model.update(&self.db).await.map_err(map_db_error)?;
            }
        }
        Ok(category)
    }
}
