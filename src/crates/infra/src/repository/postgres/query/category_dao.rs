use crate::repository::postgres::command::db_data::category;
use application::query::dao::CategoryDao;
use application::query::dto::category_item::CategoryItem;
use application::query::QueryError;
use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::*;

pub struct CategoryDaoImpl {
    db: DatabaseConnection,
}

impl CategoryDaoImpl {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_item(model: category::Model) -> CategoryItem {
    CategoryItem {
        id: model.id,
        name: model.name,
        slug: model.slug,
        parent_id: model.parent_id,
        is_child: model.is_child,
    }
}

#[inline]
fn map_db_error(e: DbErr) -> QueryError {
    QueryError::DbError(e.to_string())
}

#[async_trait]
impl CategoryDao for CategoryDaoImpl {
    async fn get_all(&self) -> Result<Vec<CategoryItem>, QueryError> {
        let rows = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_error)?;
        Ok(rows.into_iter().map(to_item).collect())
    }

    async fn get_parents(&self) -> Result<Vec<CategoryItem>, QueryError> {
        let rows = category::Entity::find()
            .filter(category::Column::ParentId.is_null())
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_error)?;
        Ok(rows.into_iter().map(to_item).collect())
    }

    async fn search_by_name(&self, query: &str) -> Result<Vec<CategoryItem>, QueryError> {
        let pattern = format!("%{}%", query.to_lowercase());
        let rows = category::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col((
                    category::Entity,
                    category::Column::Name,
                ))))
                .like(pattern),
            )
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_error)?;
        Ok(rows.into_iter().map(to_item).collect())
    }
}
